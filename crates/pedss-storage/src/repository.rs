use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use pedss_core::models::assessment::Assessment;
use pedss_core::models::patient::PatientRecord;
use pedss_core::models::statistics::{AggregateStatistics, AssessmentCounts};
use pedss_core::store_keys;
use pedss_scoring::ScoreResult;

use crate::error::StorageError;
use crate::state;
use crate::store::Store;

/// Current collection schema version. Bump when the persisted shape
/// changes; each bump requires a corresponding step in [`migrate`].
const SCHEMA_VERSION: u32 = 1;

/// The persisted assessment collection, versioned so shape changes are an
/// explicit migration instead of scattered read-path defaults.
#[derive(Debug, Serialize, Deserialize)]
struct AssessmentCollection {
    schema_version: u32,
    assessments: Vec<Assessment>,
}

impl Default for AssessmentCollection {
    fn default() -> Self {
        AssessmentCollection {
            schema_version: SCHEMA_VERSION,
            assessments: Vec::new(),
        }
    }
}

/// Migrate a raw collection document to the current schema.
///
/// v0 is the bare top-level array written by pre-versioned builds; it is
/// wrapped into the v1 envelope. A version newer than this build supports
/// is refused outright, and any other unexpected shape fails strict
/// deserialization rather than being papered over.
fn migrate(json: Value) -> Result<AssessmentCollection, StorageError> {
    let from_version = if json.is_array() {
        0
    } else {
        json.get("schema_version")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32
    };

    if from_version > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchema {
            found: from_version,
            supported: SCHEMA_VERSION,
        });
    }

    let migrated = if from_version < 1 {
        let wrapped = serde_json::json!({
            "schema_version": 1,
            "assessments": json,
        });
        info!("migrated assessment collection v0 -> v1");
        wrapped
    } else {
        json
    };

    Ok(serde_json::from_value(migrated)?)
}

/// Durable store of completed assessments, plus the incremental counters
/// behind the dashboard statistics.
///
/// The collection document is the single source of truth; the counters are
/// a cached projection kept in step on save/delete and reconcilable at any
/// time via [`AssessmentRepository::recompute_counts`].
#[derive(Debug, Clone)]
pub struct AssessmentRepository {
    store: Store,
}

impl AssessmentRepository {
    pub fn new(store: Store) -> Self {
        AssessmentRepository { store }
    }

    async fn load_collection(&self) -> Result<AssessmentCollection, StorageError> {
        match self.store.read(store_keys::ASSESSMENTS).await {
            Ok(bytes) => migrate(serde_json::from_slice(&bytes)?),
            Err(StorageError::NotFound { .. }) => Ok(AssessmentCollection::default()),
            Err(e) => Err(e),
        }
    }

    async fn save_collection(&self, collection: &AssessmentCollection) -> Result<(), StorageError> {
        state::save_state(&self.store, store_keys::ASSESSMENTS, collection).await
    }

    async fn load_counts(&self) -> Result<AssessmentCounts, StorageError> {
        state::load_state_or_default(&self.store, store_keys::ASSESSMENT_COUNTS).await
    }

    async fn save_counts(&self, counts: &AssessmentCounts) -> Result<(), StorageError> {
        state::save_state(&self.store, store_keys::ASSESSMENT_COUNTS, counts).await
    }

    /// Persist a finalized assessment.
    ///
    /// Generates the id and creation timestamp, appends to the collection,
    /// and bumps the counter for the record's risk level. A `ScoreResult`
    /// only exists for complete parameter sets, so an unfinished draft
    /// cannot reach this point.
    pub async fn save(
        &self,
        patient: PatientRecord,
        result: ScoreResult,
    ) -> Result<Assessment, StorageError> {
        let mut collection = self.load_collection().await?;

        let id = Uuid::new_v4();
        if collection.assessments.iter().any(|a| a.id == id) {
            return Err(StorageError::DuplicateId { id });
        }

        let assessment = Assessment {
            id,
            patient,
            parameters: result.parameters,
            score: result.total,
            risk_level: result.risk_level,
            created_at: jiff::Timestamp::now(),
        };

        collection.assessments.push(assessment.clone());
        self.save_collection(&collection).await?;

        let mut counts = self.load_counts().await?;
        counts.record(assessment.risk_level);
        self.save_counts(&counts).await?;

        info!(
            id = %assessment.id,
            score = assessment.score,
            risk = %assessment.risk_level,
            "saved assessment"
        );
        Ok(assessment)
    }

    /// All saved assessments, newest first.
    pub async fn get_all(&self) -> Result<Vec<Assessment>, StorageError> {
        let mut assessments = self.load_collection().await?.assessments;
        assessments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(assessments)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Assessment, StorageError> {
        self.load_collection()
            .await?
            .assessments
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(StorageError::AssessmentNotFound { id })
    }

    /// Delete one assessment and decrement its risk-level counter
    /// (saturating at zero, in case the counters had drifted).
    pub async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        let mut collection = self.load_collection().await?;
        let position = collection
            .assessments
            .iter()
            .position(|a| a.id == id)
            .ok_or(StorageError::AssessmentNotFound { id })?;

        let removed = collection.assessments.remove(position);
        self.save_collection(&collection).await?;

        let mut counts = self.load_counts().await?;
        counts.discard(removed.risk_level);
        self.save_counts(&counts).await?;

        info!(id = %id, "deleted assessment");
        Ok(())
    }

    /// Remove every assessment and zero the counters.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.store.remove(store_keys::ASSESSMENTS).await?;
        self.save_counts(&AssessmentCounts::default()).await?;
        info!("cleared all assessments");
        Ok(())
    }

    /// Counters plus mean score, as shown on the dashboard.
    ///
    /// The average is computed over the collection, rounded to one decimal
    /// place, and 0.0 for an empty store.
    pub async fn statistics(&self) -> Result<AggregateStatistics, StorageError> {
        let counts = self.load_counts().await?;
        let avg_score = if counts.total > 0 {
            let assessments = self.load_collection().await?.assessments;
            let sum: u32 = assessments.iter().map(|a| u32::from(a.score)).sum();
            let avg = f64::from(sum) / f64::from(counts.total);
            (avg * 10.0).round() / 10.0
        } else {
            0.0
        };

        Ok(AggregateStatistics {
            total: counts.total,
            high_risk: counts.high_risk,
            medium_risk: counts.medium_risk,
            low_risk: counts.low_risk,
            avg_score,
        })
    }

    /// Rebuild the counters from the collection and persist them.
    ///
    /// The incremental counters can drift if an increment or decrement is
    /// ever missed; this is the reconciliation path, also used by tests as
    /// a consistency check.
    pub async fn recompute_counts(&self) -> Result<AssessmentCounts, StorageError> {
        let assessments = self.load_collection().await?.assessments;
        let mut recomputed = AssessmentCounts::default();
        for assessment in &assessments {
            recomputed.record(assessment.risk_level);
        }

        let stored = self.load_counts().await?;
        if stored != recomputed {
            warn!(?stored, ?recomputed, "assessment counters drifted, rewriting");
        }
        self.save_counts(&recomputed).await?;
        Ok(recomputed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedss_core::models::assessment::RiskLevel;
    use pedss_core::models::patient::Gender;
    use pedss_scoring::parameters::{
        CriticalIllness, DrugRefractoriness, EegBackground, ParameterDraft, Premorbid, Semiology,
    };
    use tempfile::TempDir;

    fn patient(name: &str) -> PatientRecord {
        PatientRecord {
            name: name.to_string(),
            age_months: 24,
            gender: Gender::Male,
            assessment_date: jiff::civil::date(2025, 6, 1),
        }
    }

    fn high_risk_result() -> ScoreResult {
        // P=1, E=1, D=2, S1=0, S2 shock -> 5, High.
        ParameterDraft {
            p: Some(Premorbid::Abnormal),
            e: Some(EegBackground::Abnormal),
            d: Some(DrugRefractoriness::RefractoryStatusEpilepticus),
            s1: Some(Semiology::Focal),
            s2: CriticalIllness {
                shock: true,
                ..CriticalIllness::default()
            },
        }
        .finalize()
        .unwrap()
    }

    fn low_risk_result() -> ScoreResult {
        ParameterDraft {
            p: Some(Premorbid::Normal),
            e: Some(EegBackground::Normal),
            d: Some(DrugRefractoriness::BenzodiazepineRefractory),
            s1: Some(Semiology::Focal),
            s2: CriticalIllness::default(),
        }
        .finalize()
        .unwrap()
    }

    async fn repo(dir: &TempDir) -> AssessmentRepository {
        AssessmentRepository::new(Store::open(dir.path()).await.unwrap())
    }

    #[tokio::test]
    async fn save_then_get_by_id_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let saved = repo.save(patient("Asha"), high_risk_result()).await.unwrap();
        assert_eq!(saved.score, 5);
        assert_eq!(saved.risk_level, RiskLevel::High);

        let loaded = repo.get_by_id(saved.id).await.unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn get_all_returns_newest_first() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let first = repo.save(patient("one"), low_risk_result()).await.unwrap();
        let second = repo.save(patient("two"), low_risk_result()).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn delete_removes_record_and_decrements_counts() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let saved = repo.save(patient("Asha"), high_risk_result()).await.unwrap();
        repo.save(patient("Ravi"), low_risk_result()).await.unwrap();

        repo.delete(saved.id).await.unwrap();
        assert!(matches!(
            repo.get_by_id(saved.id).await,
            Err(StorageError::AssessmentNotFound { .. })
        ));

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.high_risk, 0);
        assert_eq!(stats.low_risk, 1);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let id = Uuid::new_v4();
        assert!(matches!(
            repo.delete(id).await,
            Err(StorageError::AssessmentNotFound { id: missing }) if missing == id
        ));
    }

    #[tokio::test]
    async fn statistics_average_rounds_to_one_decimal() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        // Scores 5 and 1 -> mean 3.0; add another 5 -> mean 11/3 = 3.7.
        repo.save(patient("a"), high_risk_result()).await.unwrap();
        repo.save(patient("b"), low_risk_result()).await.unwrap();
        repo.save(patient("c"), high_risk_result()).await.unwrap();

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.high_risk, 2);
        assert_eq!(stats.low_risk, 1);
        assert_eq!(stats.avg_score, 3.7);
    }

    #[tokio::test]
    async fn empty_store_statistics_are_all_zero() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_score, 0.0);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_all_empties_collection_and_counters() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        repo.save(patient("a"), high_risk_result()).await.unwrap();
        repo.save(patient("b"), low_risk_result()).await.unwrap();
        repo.clear_all().await.unwrap();

        assert!(repo.get_all().await.unwrap().is_empty());
        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.high_risk, 0);
        assert_eq!(stats.medium_risk, 0);
        assert_eq!(stats.low_risk, 0);
        assert_eq!(stats.avg_score, 0.0);
    }

    #[tokio::test]
    async fn recompute_corrects_drifted_counters() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        repo.save(patient("a"), high_risk_result()).await.unwrap();
        repo.save(patient("b"), low_risk_result()).await.unwrap();

        // Simulate drift: clobber the counters document.
        state::save_state(
            &repo.store,
            store_keys::ASSESSMENT_COUNTS,
            &AssessmentCounts {
                total: 9,
                high_risk: 9,
                medium_risk: 0,
                low_risk: 0,
            },
        )
        .await
        .unwrap();

        let recomputed = repo.recompute_counts().await.unwrap();
        assert_eq!(recomputed.total, 2);
        assert_eq!(recomputed.high_risk, 1);
        assert_eq!(recomputed.low_risk, 1);

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total, 2);
    }

    #[tokio::test]
    async fn bare_array_collection_migrates_to_v1() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        // A pre-versioned build wrote the collection as a bare array.
        let saved = repo.save(patient("Asha"), high_risk_result()).await.unwrap();
        let assessments = repo.get_all().await.unwrap();
        let legacy = serde_json::to_vec(&assessments).unwrap();
        repo.store
            .write(store_keys::ASSESSMENTS, &legacy)
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
    }

    #[tokio::test]
    async fn newer_schema_version_is_refused() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        repo.store
            .write(
                store_keys::ASSESSMENTS,
                br#"{"schema_version": 99, "assessments": []}"#,
            )
            .await
            .unwrap();

        assert!(matches!(
            repo.get_all().await,
            Err(StorageError::UnsupportedSchema {
                found: 99,
                supported: SCHEMA_VERSION
            })
        ));
    }

    #[tokio::test]
    async fn malformed_record_shape_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        repo.store
            .write(
                store_keys::ASSESSMENTS,
                br#"{"schema_version": 1, "assessments": [{"id": "not-a-record"}]}"#,
            )
            .await
            .unwrap();

        assert!(matches!(
            repo.get_all().await,
            Err(StorageError::Serialization(_))
        ));
    }
}
