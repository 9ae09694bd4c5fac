pub(crate) mod helpers {
    use parrain_core::CohortCode;
    use parrain_core::entities::StudentRecord;

    use crate::service::ParrainService;

    pub(crate) async fn test_service() -> ParrainService {
        ParrainService::new_local(":memory:").await.unwrap()
    }

    /// In-memory service with the given cohorts already seeded.
    pub(crate) async fn seeded_service(cohorts: &[&str]) -> ParrainService {
        let svc = test_service().await;
        svc.seed_cohorts(&codes(cohorts)).await.unwrap();
        svc
    }

    pub(crate) fn codes(raw: &[&str]) -> Vec<CohortCode> {
        raw.iter().map(|c| CohortCode::new(c).unwrap()).collect()
    }

    pub(crate) fn record(last: &str, first: &str, cohort: &str) -> StudentRecord {
        StudentRecord {
            last_name: last.into(),
            first_name: first.into(),
            registration_code: None,
            cohort: cohort.into(),
        }
    }

    /// Id of the first student (insertion order) with the given last name.
    pub(crate) async fn student_id(svc: &ParrainService, last_name: &str) -> String {
        svc.list_students()
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.last_name == last_name)
            .map(|s| s.id)
            .unwrap()
    }
}
