//! Party lifecycle tests: create, edit, manage participants, launch

use std::collections::HashSet;

use tempfile::TempDir;
use wichtel_core::config::Config;
use wichtel_core::{Error, PartyStatus, SessionUser, WichtelContext};

fn ctx(dir: &TempDir) -> WichtelContext {
    WichtelContext::with_config(dir.path(), Config::without_latency()).unwrap()
}

async fn register(ctx: &WichtelContext, name: &str, email: &str) -> SessionUser {
    ctx.identity_service
        .register(name, email, "pw")
        .await
        .unwrap()
}

fn two_guests() -> Vec<(String, String)> {
    vec![
        ("Bob".to_string(), "bob@example.com".to_string()),
        ("Carol".to_string(), "carol@example.com".to_string()),
    ]
}

#[tokio::test]
async fn test_create_party_draft_with_creator_first() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;

    let party = ctx
        .party_service
        .create_party(&alice, "Office Party", "Annual exchange", None, &two_guests())
        .await
        .unwrap();

    assert_eq!(party.status, PartyStatus::Draft);
    assert_eq!(party.participants.len(), 3);
    assert_eq!(party.participants[0], alice.id);
    assert_eq!(party.participant_details.len(), 3);
    assert!(party.assignments.is_none());

    // One pending invitation per non-creator participant
    use wichtel_core::ports::InvitationStore;
    let invitations = ctx.store.list_invitations().await.unwrap();
    assert_eq!(invitations.len(), 2);
    assert!(invitations.iter().all(|i| i.party_id == party.id));
}

#[tokio::test]
async fn test_create_party_needs_two_guests() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;

    let one_guest = vec![("Bob".to_string(), "bob@example.com".to_string())];
    let err = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &one_guest)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_create_party_rejects_duplicate_guest_emails() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;

    let guests = vec![
        ("Bob".to_string(), "bob@example.com".to_string()),
        ("Bobby".to_string(), "BOB@example.com".to_string()),
    ];
    let err = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &guests)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateParticipant(_)));
}

#[tokio::test]
async fn test_add_participant_duplicate_email_leaves_lists_unchanged() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;
    let party = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &two_guests())
        .await
        .unwrap();

    let err = ctx
        .party_service
        .add_participant(&party.id, &alice, "Bobby", "Bob@Example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateParticipant(_)));

    let stored = ctx.party_service.view_party(&party.id, &alice).await.unwrap();
    assert_eq!(stored.participants.len(), 3);
    assert_eq!(stored.participant_details.len(), 3);
}

#[tokio::test]
async fn test_only_creator_manages() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;
    let party = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &two_guests())
        .await
        .unwrap();

    let mallory = register(&ctx, "Mallory", "mallory@example.com").await;
    let err = ctx
        .party_service
        .update_basic_info(&party.id, &mallory, "Hijacked", "desc", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = ctx.party_service.launch(&party.id, &mallory).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_creator_cannot_be_removed() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;
    let party = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &two_guests())
        .await
        .unwrap();

    let err = ctx
        .party_service
        .remove_participant(&party.id, &alice, &alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_launch_needs_three_participants() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;
    let party = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &two_guests())
        .await
        .unwrap();

    // Drop one guest: 2 participants remain.
    let bob_id = party.participant_details[1].id.clone();
    let (party, removed) = ctx
        .party_service
        .remove_participant(&party.id, &alice, &bob_id)
        .await
        .unwrap();
    assert!(removed);
    assert_eq!(party.participants.len(), 2);

    let err = ctx.party_service.launch(&party.id, &alice).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientParticipants { required: 3, found: 2 }
    ));
}

#[tokio::test]
async fn test_launch_draws_a_full_cycle_and_freezes_the_party() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;
    let party = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &two_guests())
        .await
        .unwrap();

    let launched = ctx.party_service.launch(&party.id, &alice).await.unwrap();
    assert_eq!(launched.status, PartyStatus::Active);
    assert!(launched.launched_at.is_some());

    let assignments = launched.assignments.as_ref().unwrap();
    assert_eq!(assignments.len(), 3);

    let input: HashSet<_> = launched.participants.iter().cloned().collect();
    let givers: HashSet<_> = assignments.iter().map(|a| a.giver.clone()).collect();
    let receivers: HashSet<_> = assignments.iter().map(|a| a.receiver.clone()).collect();
    assert_eq!(givers, input);
    assert_eq!(receivers, input);
    assert!(assignments.iter().all(|a| a.giver != a.receiver));

    // Everyone has a target, including the creator.
    let target = ctx.party_service.my_target(&party.id, &alice).await.unwrap();
    assert!(target.is_some());

    // Launched parties are frozen.
    let err = ctx
        .party_service
        .add_participant(&party.id, &alice, "Dan", "dan@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = ctx.party_service.launch(&party.id, &alice).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_update_basic_info_validation_and_missing_party() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;
    let party = ctx
        .party_service
        .create_party(&alice, "Party", "desc", None, &two_guests())
        .await
        .unwrap();

    let err = ctx
        .party_service
        .update_basic_info(&party.id, &alice, "", "desc", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = ctx
        .party_service
        .update_basic_info("no-such-party", &alice, "Name", "desc", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let updated = ctx
        .party_service
        .update_basic_info(
            &party.id,
            &alice,
            "Renamed",
            "New description",
            Some(rust_decimal::Decimal::new(2000, 2)),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.version, party.version + 1);
}

#[tokio::test]
async fn test_dashboard_listing_newest_first() {
    let dir = TempDir::new().unwrap();
    let ctx = ctx(&dir);
    let alice = register(&ctx, "Alice", "alice@example.com").await;

    ctx.party_service
        .create_party(&alice, "First", "desc", None, &two_guests())
        .await
        .unwrap();
    let guests = vec![
        ("Dan".to_string(), "dan@example.com".to_string()),
        ("Erin".to_string(), "erin@example.com".to_string()),
    ];
    ctx.party_service
        .create_party(&alice, "Second", "desc", None, &guests)
        .await
        .unwrap();

    let parties = ctx.party_service.list_for_user(&alice).await.unwrap();
    assert_eq!(parties.len(), 2);
    assert!(parties[0].created_at >= parties[1].created_at);
}
