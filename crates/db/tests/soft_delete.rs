//! Integration tests for soft-delete filtering and the permanent delete path.
//!
//! - Soft-deleted towers and providers are hidden from `find_by_id` and lists
//! - `find_by_id_include_deleted` still sees them
//! - `hard_delete` removes them regardless of soft-delete state

use sqlx::PgPool;
use towertrack_core::tower::{Coordinates, TowerDetails};
use towertrack_db::models::provider::CreateProvider;
use towertrack_db::models::tower::CreateTower;
use towertrack_db::repositories::{ProviderRepo, TowerRepo};

fn new_tower(provider_ids: Vec<i64>) -> CreateTower {
    CreateTower {
        coordinates: Coordinates::new(1.0, 2.0).unwrap(),
        details: TowerDetails::default(),
        photo_url: None,
        provider_ids,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_tower_is_hidden(pool: PgPool) {
    let created = TowerRepo::create(&pool, &new_tower(vec![])).await.unwrap();
    let id = created.tower.id;

    assert!(TowerRepo::soft_delete(&pool, id).await.unwrap());
    assert!(!TowerRepo::soft_delete(&pool, id).await.unwrap(), "idempotent");

    assert!(TowerRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(TowerRepo::find_by_id_with_providers(&pool, id)
        .await
        .unwrap()
        .is_none());
    let listed = TowerRepo::list_with_providers(&pool).await.unwrap();
    assert!(!listed.iter().any(|t| t.tower.id == id));

    let raw = TowerRepo::find_by_id_include_deleted(&pool, id)
        .await
        .unwrap()
        .expect("include_deleted should still find the row");
    assert!(raw.deleted_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_tower_rejects_mutations(pool: PgPool) {
    let created = TowerRepo::create(&pool, &new_tower(vec![])).await.unwrap();
    let id = created.tower.id;
    TowerRepo::soft_delete(&pool, id).await.unwrap();

    assert!(TowerRepo::set_coordinates(&pool, id, 5.0, 5.0)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hard_delete_reaches_soft_deleted_tower(pool: PgPool) {
    let created = TowerRepo::create(&pool, &new_tower(vec![])).await.unwrap();
    let id = created.tower.id;
    TowerRepo::soft_delete(&pool, id).await.unwrap();

    assert!(TowerRepo::hard_delete(&pool, id).await.unwrap());
    assert!(TowerRepo::find_by_id_include_deleted(&pool, id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_provider_is_hidden_everywhere(pool: PgPool) {
    let provider = ProviderRepo::create(
        &pool,
        &CreateProvider {
            name: "Retired Operator".into(),
            address: String::new(),
        },
    )
    .await
    .unwrap();
    let created = TowerRepo::create(&pool, &new_tower(vec![provider.id]))
        .await
        .unwrap();
    assert_eq!(created.providers.len(), 1);

    assert!(ProviderRepo::soft_delete(&pool, provider.id).await.unwrap());

    assert!(ProviderRepo::find_by_id(&pool, provider.id)
        .await
        .unwrap()
        .is_none());
    assert!(ProviderRepo::find_many(&pool, &[provider.id])
        .await
        .unwrap()
        .is_empty());
    assert!(!ProviderRepo::list(&pool)
        .await
        .unwrap()
        .iter()
        .any(|p| p.id == provider.id));

    let tower = TowerRepo::find_by_id_with_providers(&pool, created.tower.id)
        .await
        .unwrap()
        .unwrap();
    assert!(tower.providers.is_empty());

    assert!(ProviderRepo::find_by_id_include_deleted(&pool, provider.id)
        .await
        .unwrap()
        .is_some());
    assert!(ProviderRepo::hard_delete(&pool, provider.id).await.unwrap());
}
