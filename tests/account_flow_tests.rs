//! Integration tests for registration, login, point assignment and the
//! leaderboard, driven through the route layer against the local repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use greenquest::api::types::{
    AddGamePointsRequest, AssignPointsRequest, LoginRequest, RegisterRequest,
};
use greenquest::config::AppConfig;
use greenquest::db::repositories::LocalRepository;
use greenquest::db::CollectionRepository;
use greenquest::models::{NewCollectionEvent, WasteType};
use greenquest::routes::{accounts, awards, notifications, AppContext};

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-secret".to_string();
    config.auth.bcrypt_cost = 4; // minimum cost, keeps tests fast
    config
}

async fn context() -> AppContext<LocalRepository> {
    let ctx = AppContext::new(Arc::new(LocalRepository::new()), test_config());
    ctx.bootstrap().await.unwrap();
    ctx
}

fn register_request(phone: &str) -> RegisterRequest {
    RegisterRequest {
        full_name: "Priya Sharma".to_string(),
        phone: phone.to_string(),
        email: Some("priya@example.com".to_string()),
        village: "Greendale".to_string(),
        household_size: "4".to_string(),
        address: "12 Main St".to_string(),
        password: "hunter2".to_string(),
    }
}

async fn admin_token(ctx: &AppContext<LocalRepository>) -> String {
    accounts::login(
        ctx,
        LoginRequest {
            username: "admin123".to_string(),
            password: "admin123".to_string(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap()
    .token
}

#[tokio::test]
async fn register_then_fetch_profile() {
    let ctx = context().await;

    let auth = accounts::register(&ctx, register_request("9900112233"))
        .await
        .unwrap();
    assert_eq!(auth.profile.points, 0);
    assert_eq!(auth.profile.level, 1);

    let profile = accounts::profile(&ctx, &auth.token).await.unwrap();
    assert_eq!(profile.identity, "9900112233");
    assert_eq!(profile.tier_name, "Eco-Starter");
    assert!(profile.redeemed_rewards.is_empty());
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
    let ctx = context().await;

    accounts::register(&ctx, register_request("111")).await.unwrap();
    let err = accounts::register(&ctx, register_request("111"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "conflict");
}

#[tokio::test]
async fn blank_required_field_is_invalid_input() {
    let ctx = context().await;

    let mut request = register_request("222");
    request.village = "   ".to_string();
    let err = accounts::register(&ctx, request).await.unwrap_err();
    assert_eq!(err.kind(), "invalid_input");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let ctx = context().await;
    accounts::register(&ctx, register_request("333")).await.unwrap();

    let wrong_password = accounts::login(
        &ctx,
        LoginRequest {
            username: "333".to_string(),
            password: "nope".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap_err();

    let no_such_account = accounts::login(
        &ctx,
        LoginRequest {
            username: "does-not-exist".to_string(),
            password: "nope".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(wrong_password.kind(), "unauthorized");
    assert_eq!(wrong_password.to_string(), no_such_account.to_string());
}

#[tokio::test]
async fn unknown_login_role_is_invalid_input() {
    let ctx = context().await;
    let err = accounts::login(
        &ctx,
        LoginRequest {
            username: "333".to_string(),
            password: "pw".to_string(),
            role: "superuser".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_input");
}

#[tokio::test]
async fn expired_token_requires_relogin() {
    let mut config = test_config();
    config.auth.token_ttl_days = -1;
    let expired_ctx = AppContext::new(Arc::new(LocalRepository::new()), config);
    expired_ctx.bootstrap().await.unwrap();

    let auth = accounts::register(&expired_ctx, register_request("444"))
        .await
        .unwrap();

    let err = accounts::profile(&expired_ctx, &auth.token).await.unwrap_err();
    assert_eq!(err.kind(), "unauthorized");
    assert!(err.to_string().contains("expired"));
}

#[tokio::test]
async fn assign_points_end_to_end_with_tier_up() {
    let ctx = context().await;
    let user = accounts::register(&ctx, register_request("555")).await.unwrap();
    let admin = admin_token(&ctx).await;

    // 50 kg of e-waste at 25 pts/kg crosses the level-4 threshold (700)
    let response = awards::assign_points(
        &ctx,
        &admin,
        AssignPointsRequest {
            phone: "555".to_string(),
            waste_type: "ecofriendly".to_string(),
            weight_kg: 50.0,
        },
    )
    .await
    .unwrap();

    assert_eq!(response.points_awarded, 1250);
    assert_eq!(response.new_balance, 1250);
    assert_eq!(response.level, 4);
    assert!(response.explanation.is_empty());

    let profile = accounts::profile(&ctx, &user.token).await.unwrap();
    assert_eq!(profile.tier_name, "Planet-Hero");

    let notes = notifications::notifications(&ctx, &user.token).await.unwrap();
    assert!(
        notes.iter().any(|n| n.message.contains("Planet-Hero")),
        "expected a tier-up notification, got {:?}",
        notes
    );
}

#[tokio::test]
async fn assign_points_requires_the_admin_role() {
    let ctx = context().await;
    let user = accounts::register(&ctx, register_request("666")).await.unwrap();

    let err = awards::assign_points(
        &ctx,
        &user.token,
        AssignPointsRequest {
            phone: "666".to_string(),
            waste_type: "plastic".to_string(),
            weight_kg: 1.0,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "forbidden");
}

#[tokio::test]
async fn assign_points_validation_happens_before_any_mutation() {
    let ctx = context().await;
    accounts::register(&ctx, register_request("777")).await.unwrap();
    let admin = admin_token(&ctx).await;

    let err = awards::assign_points(
        &ctx,
        &admin,
        AssignPointsRequest {
            phone: "777".to_string(),
            waste_type: "uranium".to_string(),
            weight_kg: 3.0,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_input");

    let err = awards::assign_points(
        &ctx,
        &admin,
        AssignPointsRequest {
            phone: "777".to_string(),
            waste_type: "plastic".to_string(),
            weight_kg: -2.0,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_input");

    assert_eq!(ctx.repo.collection_count(), 0);
}

#[tokio::test]
async fn assign_points_for_unknown_phone_is_not_found() {
    let ctx = context().await;
    let admin = admin_token(&ctx).await;

    let err = awards::assign_points(
        &ctx,
        &admin,
        AssignPointsRequest {
            phone: "0000000".to_string(),
            waste_type: "organic".to_string(),
            weight_kg: 2.0,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn plastic_reduction_trend_earns_the_bonus() {
    let ctx = context().await;
    let user = accounts::register(&ctx, register_request("888")).await.unwrap();
    let admin = admin_token(&ctx).await;

    // 20 kg in the earlier half of the window, 5 kg in the later half
    let now = Utc::now();
    for (weight_kg, days_ago) in [(12.0, 25), (8.0, 20), (5.0, 5)] {
        ctx.repo
            .insert_collection(NewCollectionEvent {
                account_id: user.profile.id,
                waste_type: WasteType::Plastic,
                weight_kg,
                points: 0,
                collected_by: "admin123".to_string(),
                date: now - Duration::days(days_ago),
            })
            .await
            .unwrap();
    }

    let response = awards::assign_points(
        &ctx,
        &admin,
        AssignPointsRequest {
            phone: "888".to_string(),
            waste_type: "plastic".to_string(),
            weight_kg: 10.0,
        },
    )
    .await
    .unwrap();

    assert_eq!(response.points_awarded, 120); // 100 × 1.2
    assert!(response.explanation.contains("+20%"));
}

#[tokio::test]
async fn game_points_credit_and_tier_notification() {
    let ctx = context().await;
    let user = accounts::register(&ctx, register_request("999")).await.unwrap();

    let response = awards::add_game_points(
        &ctx,
        &user.token,
        AddGamePointsRequest {
            points: 150,
            source: "trash-sort".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(response.new_balance, 150);
    assert_eq!(response.level, 2);

    let notes = notifications::notifications(&ctx, &user.token).await.unwrap();
    assert!(notes.iter().any(|n| n.message.contains("Green-Helper")));

    let err = awards::add_game_points(
        &ctx,
        &user.token,
        AddGamePointsRequest {
            points: 0,
            source: "trash-sort".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_input");
}

#[tokio::test]
async fn game_point_credits_never_overflow_the_balance() {
    let ctx = context().await;
    let user = accounts::register(&ctx, register_request("998")).await.unwrap();

    awards::add_game_points(
        &ctx,
        &user.token,
        AddGamePointsRequest {
            points: u64::MAX,
            source: "trash-sort".to_string(),
        },
    )
    .await
    .unwrap();

    let err = awards::add_game_points(
        &ctx,
        &user.token,
        AddGamePointsRequest {
            points: 10,
            source: "trash-sort".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_input");

    let profile = accounts::profile(&ctx, &user.token).await.unwrap();
    assert_eq!(profile.points, u64::MAX);
}

#[tokio::test]
async fn leaderboard_and_stats_reflect_activity() {
    let ctx = context().await;
    let admin = admin_token(&ctx).await;

    for (phone, weight_kg) in [("201", 4.0), ("202", 10.0), ("203", 1.0)] {
        accounts::register(&ctx, register_request(phone)).await.unwrap();
        awards::assign_points(
            &ctx,
            &admin,
            AssignPointsRequest {
                phone: phone.to_string(),
                waste_type: "organic".to_string(),
                weight_kg,
            },
        )
        .await
        .unwrap();
    }

    let board = accounts::leaderboard(&ctx).await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[0].points, 150);
    assert!(board[0].points >= board[1].points);
    assert!(board[1].points >= board[2].points);

    let stats = accounts::stats(&ctx).await.unwrap();
    assert_eq!(stats.households, 3);
    assert_eq!(stats.villages, 1);
    assert!((stats.waste_collected_kg - 15.0).abs() < 1e-9);
    assert_eq!(stats.rewards_redeemed, 0);
}

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let ctx = context().await;
    // A second bootstrap must neither fail nor create a second admin
    ctx.bootstrap().await.unwrap();
    assert_eq!(ctx.repo.account_count(), 1);
}
