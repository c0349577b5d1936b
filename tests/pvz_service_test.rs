//! Pickup point service unit tests.
//!
//! Validation is pure and synchronous, so an invalid request must fail
//! before any repository call. The mocks carry no expectations in those
//! tests; an unexpected call would panic.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use pvz_service::domain::{City, Product, ProductType, Reception, ReceptionStatus};
use pvz_service::errors::AppError;
use pvz_service::infra::{MockPvzRepository, MockUserRepository, PvzRepository, UnitOfWork, UserRepository};
use pvz_service::services::{PvzManager, PvzService};
use pvz_service::types::PaginationParams;

/// Test mock for UnitOfWork that wraps a MockPvzRepository
struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    pvz_repo: Arc<MockPvzRepository>,
}

impl TestUnitOfWork {
    fn new(pvz_repo: MockPvzRepository) -> Self {
        Self {
            user_repo: Arc::new(MockUserRepository::new()),
            pvz_repo: Arc::new(pvz_repo),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn pvz(&self) -> Arc<dyn PvzRepository> {
        self.pvz_repo.clone()
    }
}

fn service_with(repo: MockPvzRepository) -> PvzManager<TestUnitOfWork> {
    PvzManager::new(Arc::new(TestUnitOfWork::new(repo)))
}

fn test_reception(pvz_id: Uuid, status: ReceptionStatus) -> Reception {
    Reception {
        id: Uuid::new_v4(),
        date_time: Utc::now(),
        pvz_id,
        status,
    }
}

#[tokio::test]
async fn create_pvz_persists_allow_listed_city() {
    let mut repo = MockPvzRepository::new();
    repo.expect_create_pvz().returning(|pvz| Ok(pvz));

    let service = service_with(repo);
    let result = service.create_pvz("Казань".to_string(), None).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().city, "Казань");
}

#[tokio::test]
async fn create_pvz_rejects_unknown_city_before_io() {
    // No expectations: a repository call would panic the test.
    let service = service_with(MockPvzRepository::new());
    let result = service.create_pvz("Новосибирск".to_string(), None).await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCity));
}

#[tokio::test]
async fn create_pvz_rejects_future_registration_date() {
    let service = service_with(MockPvzRepository::new());
    let future = Utc::now() + Duration::hours(1);
    let result = service.create_pvz("Москва".to_string(), Some(future)).await;

    assert!(matches!(result.unwrap_err(), AppError::FutureDate));
}

#[tokio::test]
async fn create_pvz_keeps_explicit_past_registration_date() {
    let past = Utc::now() - Duration::days(30);

    let mut repo = MockPvzRepository::new();
    repo.expect_create_pvz().returning(|pvz| Ok(pvz));

    let service = service_with(repo);
    let result = service
        .create_pvz("Москва".to_string(), Some(past))
        .await
        .unwrap();

    assert_eq!(result.registration_date, past);
}

#[tokio::test]
async fn open_reception_propagates_conflict() {
    let pvz_id = Uuid::new_v4();

    let mut repo = MockPvzRepository::new();
    repo.expect_open_reception()
        .with(eq(pvz_id))
        .returning(|_| Err(AppError::ActiveReceptionConflict));

    let service = service_with(repo);
    let result = service.open_reception(pvz_id).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::ActiveReceptionConflict
    ));
}

#[tokio::test]
async fn open_reception_returns_in_progress() {
    let pvz_id = Uuid::new_v4();

    let mut repo = MockPvzRepository::new();
    repo.expect_open_reception()
        .with(eq(pvz_id))
        .returning(|id| Ok(test_reception(id, ReceptionStatus::InProgress)));

    let service = service_with(repo);
    let reception = service.open_reception(pvz_id).await.unwrap();

    assert_eq!(reception.pvz_id, pvz_id);
    assert_eq!(reception.status, "in_progress");
}

#[tokio::test]
async fn add_product_rejects_unknown_type_before_io() {
    let service = service_with(MockPvzRepository::new());
    let result = service
        .add_product(Uuid::new_v4(), "мебель".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidProductType));
}

#[tokio::test]
async fn add_product_passes_parsed_type() {
    let pvz_id = Uuid::new_v4();

    let mut repo = MockPvzRepository::new();
    repo.expect_add_product()
        .with(eq(pvz_id), eq(ProductType::Electronics))
        .returning(|_, product_type| {
            Ok(Product {
                id: Uuid::new_v4(),
                date_time: Utc::now(),
                product_type,
                reception_id: Uuid::new_v4(),
            })
        });

    let service = service_with(repo);
    let product = service
        .add_product(pvz_id, "электроника".to_string())
        .await
        .unwrap();

    assert_eq!(product.product_type, "электроника");
}

#[tokio::test]
async fn add_product_propagates_missing_reception() {
    let mut repo = MockPvzRepository::new();
    repo.expect_add_product()
        .returning(|_, _| Err(AppError::NoActiveReception));

    let service = service_with(repo);
    let result = service
        .add_product(Uuid::new_v4(), "обувь".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NoActiveReception));
}

#[tokio::test]
async fn remove_last_product_delegates() {
    let pvz_id = Uuid::new_v4();

    let mut repo = MockPvzRepository::new();
    repo.expect_remove_last_product()
        .with(eq(pvz_id))
        .returning(|_| Ok(()));

    let service = service_with(repo);
    assert!(service.remove_last_product(pvz_id).await.is_ok());
}

#[tokio::test]
async fn close_reception_propagates_missing_reception() {
    // Closing twice behaves like closing with no reception open.
    let mut repo = MockPvzRepository::new();
    repo.expect_close_reception()
        .returning(|_| Err(AppError::NoActiveReception));

    let service = service_with(repo);
    let result = service.close_reception(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NoActiveReception));
}

#[tokio::test]
async fn close_reception_returns_closed_status() {
    let pvz_id = Uuid::new_v4();

    let mut repo = MockPvzRepository::new();
    repo.expect_close_reception()
        .with(eq(pvz_id))
        .returning(|id| Ok(test_reception(id, ReceptionStatus::Closed)));

    let service = service_with(repo);
    let reception = service.close_reception(pvz_id).await.unwrap();

    assert_eq!(reception.status, "closed");
}

#[tokio::test]
async fn list_pvz_rejects_page_zero_before_io() {
    let service = service_with(MockPvzRepository::new());
    let pagination = PaginationParams { page: 0, limit: 10 };
    let result = service.list_pvz(None, None, pagination).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn list_pvz_rejects_oversized_limit_before_io() {
    let service = service_with(MockPvzRepository::new());
    let pagination = PaginationParams { page: 1, limit: 31 };
    let result = service.list_pvz(None, None, pagination).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn list_pvz_rejects_inverted_date_range() {
    let service = service_with(MockPvzRepository::new());
    let start = Utc::now() - Duration::days(1);
    let end = start - Duration::days(1);
    let result = service
        .list_pvz(Some(start), Some(end), PaginationParams::default())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn list_pvz_rejects_future_dates() {
    let service = service_with(MockPvzRepository::new());
    let future = Utc::now() + Duration::hours(2);
    let result = service
        .list_pvz(Some(future), None, PaginationParams::default())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::FutureDate));
}

#[tokio::test]
async fn list_pvz_translates_page_to_offset() {
    let mut repo = MockPvzRepository::new();
    repo.expect_list_pvz()
        .withf(|filter| filter.limit == 5 && filter.offset == 5)
        .returning(|_| Ok(vec![]));

    let service = service_with(repo);
    let pagination = PaginationParams { page: 2, limit: 5 };
    let result = service.list_pvz(None, None, pagination).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn list_pvz_accepts_equal_start_and_end() {
    let date = Utc::now() - Duration::days(1);

    let mut repo = MockPvzRepository::new();
    repo.expect_list_pvz().returning(|_| Ok(vec![]));

    let service = service_with(repo);
    let result = service
        .list_pvz(Some(date), Some(date), PaginationParams::default())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn create_pvz_accepts_every_allowed_city() {
    for city in [City::Moscow, City::SaintPetersburg, City::Kazan] {
        let mut repo = MockPvzRepository::new();
        repo.expect_create_pvz().returning(|pvz| Ok(pvz));

        let service = service_with(repo);
        let result = service.create_pvz(city.to_string(), None).await;
        assert!(result.is_ok(), "city {} should be accepted", city);
    }
}
