//! End-to-end guest lifecycle: registration, check-in, guarded deletion.
//!
//! Exercises the services the HTTP handlers delegate to, against the
//! in-memory store.

#![allow(clippy::unwrap_used)]

use undangan_core::{Attendance, GuestId};
use undangan_integration_tests::{submission, submission_with};
use undangan_server::services::{
    CheckInError, CheckInService, GuestAdminError, GuestAdminService, RegistrationError,
    RegistrationService,
};
use undangan_server::store::{GuestStore, MemoryGuestStore};

#[tokio::test]
async fn identifiers_are_minted_from_name_and_sequence() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);

    let budi = registration
        .register(submission("Budi Santoso"))
        .await
        .unwrap();
    let siti = registration.register(submission("Siti")).await.unwrap();

    assert_eq!(budi.guest_id.as_str(), "Budi_Santoso-001");
    assert_eq!(siti.guest_id.as_str(), "Siti-002");
}

#[tokio::test]
async fn identifier_suffix_is_three_zero_padded_digits() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);

    let record = registration.register(submission("Jane Doe")).await.unwrap();

    let (prefix, suffix) = record.guest_id.as_str().rsplit_once('-').unwrap();
    assert_eq!(prefix, "Jane_Doe");
    assert_eq!(suffix.len(), 3);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn surrounding_whitespace_survives_into_the_identifier() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);

    let record = registration.register(submission(" Budi ")).await.unwrap();

    assert_eq!(record.name, " Budi ");
    assert_eq!(record.guest_id.as_str(), "_Budi_-001");
}

#[tokio::test]
async fn sequences_above_three_digits_keep_their_width() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);

    for n in 0..999 {
        registration
            .register(submission(&format!("Guest {n}")))
            .await
            .unwrap();
    }
    let thousandth = registration.register(submission("Jane")).await.unwrap();

    assert_eq!(thousandth.guest_id.as_str(), "Jane-1000");
    assert_eq!(thousandth.guest_id.sequence(), Some(1000));
}

#[tokio::test]
async fn longest_accepted_name_still_scans() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let check_in = CheckInService::new(&store);

    let name = "a".repeat(GuestId::MAX_NAME_LENGTH);
    let guest = registration.register(submission(&name)).await.unwrap();

    let updated = check_in.check_in(guest.guest_id.as_str()).await.unwrap();
    assert!(updated.checked_in);
}

#[tokio::test]
async fn overlong_names_are_rejected_at_registration() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);

    let rejected = registration.register(submission(&"a".repeat(600))).await;
    assert!(matches!(rejected, Err(RegistrationError::NameTooLong)));

    // Nothing reached the store for the rejected submission.
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn records_serialize_with_invitation_wire_names() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);

    let record = registration
        .register(submission_with(
            "Budi Santoso",
            "Selamat menempuh hidup baru!",
            Attendance::NotAttending,
        ))
        .await
        .unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["id_tamu"], "Budi_Santoso-001");
    assert_eq!(value["nama"], "Budi Santoso");
    assert_eq!(value["pesan"], "Selamat menempuh hidup baru!");
    assert_eq!(value["kehadiran"], "Tidak Hadir");
    assert_eq!(value["scanned"], false);
    assert!(value["timestamp"].is_string());
    // Not serialized until the guest checks in.
    assert!(value.get("timestamp_scan").is_none());
}

#[tokio::test]
async fn first_scan_wins_and_repeats_are_rejected() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let check_in = CheckInService::new(&store);

    let guest = registration.register(submission("Budi")).await.unwrap();

    let updated = check_in.check_in(guest.guest_id.as_str()).await.unwrap();
    assert!(updated.checked_in);
    assert!(updated.checked_in_at.is_some());

    let repeat = check_in.check_in(guest.guest_id.as_str()).await;
    assert!(matches!(repeat, Err(CheckInError::AlreadyCheckedIn)));

    // The repeat left the original scan time in place.
    let stored = store.get_by_guest_id(&guest.guest_id).await.unwrap().unwrap();
    assert_eq!(stored.checked_in_at, updated.checked_in_at);
}

#[tokio::test]
async fn scanning_an_unknown_code_is_not_found() {
    let store = MemoryGuestStore::new();
    let check_in = CheckInService::new(&store);

    let result = check_in.check_in("Nobody-999").await;
    assert!(matches!(result, Err(CheckInError::NotFound)));
}

#[tokio::test]
async fn deletion_requires_a_prior_scan() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let admin = GuestAdminService::new(&store);

    let guest = registration.register(submission("Siti")).await.unwrap();

    let refused = admin.delete(&guest.doc_id.to_string()).await;
    assert!(matches!(refused, Err(GuestAdminError::NotCheckedIn)));

    // The refused delete left the record in place.
    let kept = store.get_by_doc_id(guest.doc_id).await.unwrap();
    assert!(kept.is_some());
}

#[tokio::test]
async fn deleted_guests_disappear_from_every_lookup() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let check_in = CheckInService::new(&store);
    let admin = GuestAdminService::new(&store);

    let guest = registration.register(submission("Budi")).await.unwrap();
    check_in.check_in(guest.guest_id.as_str()).await.unwrap();

    admin.delete(&guest.doc_id.to_string()).await.unwrap();

    let listed = admin.list_all().await.unwrap();
    assert!(listed.is_empty());

    let rescan = check_in.check_in(guest.guest_id.as_str()).await;
    assert!(matches!(rescan, Err(CheckInError::NotFound)));

    let redelete = admin.delete(&guest.doc_id.to_string()).await;
    assert!(matches!(redelete, Err(GuestAdminError::NotFound)));
}

#[tokio::test]
async fn deletion_does_not_recycle_sequence_numbers() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let check_in = CheckInService::new(&store);
    let admin = GuestAdminService::new(&store);

    let first = registration.register(submission("Budi")).await.unwrap();
    check_in.check_in(first.guest_id.as_str()).await.unwrap();
    admin.delete(&first.doc_id.to_string()).await.unwrap();

    let second = registration.register(submission("Siti")).await.unwrap();
    assert_eq!(second.guest_id.sequence(), Some(2));
}

#[tokio::test]
async fn listing_reflects_check_in_state_without_staleness() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let check_in = CheckInService::new(&store);
    let admin = GuestAdminService::new(&store);

    let budi = registration.register(submission("Budi")).await.unwrap();
    registration.register(submission("Siti")).await.unwrap();

    let before = admin.list_all().await.unwrap();
    assert!(before.iter().all(|g| !g.checked_in));

    check_in.check_in(budi.guest_id.as_str()).await.unwrap();

    let after = admin.list_all().await.unwrap();
    let scanned = after
        .iter()
        .find(|g| g.guest_id == budi.guest_id)
        .unwrap();
    assert!(scanned.checked_in);
    assert!(scanned.checked_in_at.is_some());
}

#[tokio::test]
async fn listing_orders_newest_registration_first() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let admin = GuestAdminService::new(&store);

    for name in ["Budi", "Siti", "Andi"] {
        registration.register(submission(name)).await.unwrap();
    }

    let listed = admin.list_all().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(
        listed
            .iter()
            .zip(listed.iter().skip(1))
            .all(|(earlier, later)| earlier.registered_at >= later.registered_at)
    );
}

#[tokio::test]
async fn full_lifecycle_matches_the_reception_flow() {
    let store = MemoryGuestStore::new();
    let registration = RegistrationService::new(&store);
    let check_in = CheckInService::new(&store);
    let admin = GuestAdminService::new(&store);

    // Two RSVPs arrive before the reception.
    let budi = registration
        .register(submission("Budi Santoso"))
        .await
        .unwrap();
    let siti = registration.register(submission("Siti")).await.unwrap();
    assert_eq!(budi.guest_id.as_str(), "Budi_Santoso-001");
    assert_eq!(siti.guest_id.as_str(), "Siti-002");

    // Budi arrives and is scanned once; a second scan of the same code fails.
    check_in.check_in(budi.guest_id.as_str()).await.unwrap();
    let repeat = check_in.check_in(budi.guest_id.as_str()).await;
    assert!(matches!(repeat, Err(CheckInError::AlreadyCheckedIn)));

    // Siti never arrived, so her record cannot be cleaned up yet.
    let refused = admin.delete(&siti.doc_id.to_string()).await;
    assert!(matches!(refused, Err(GuestAdminError::NotCheckedIn)));

    // Budi's record can be removed after the event.
    admin.delete(&budi.doc_id.to_string()).await.unwrap();

    let remaining = admin.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.first().unwrap().guest_id, siti.guest_id);
}
