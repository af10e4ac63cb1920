use inspire::config::StorageKeys;
use inspire::{
    EntityKind, Field, ImageChange, ImageRef, ManualClock, MemoryKv, PersistedStore, SortMode,
    StoreError,
};

fn new_store() -> (PersistedStore<MemoryKv>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    let store = PersistedStore::with_keys(
        MemoryKv::new(),
        StorageKeys::with_prefix("shareToInspire"),
        clock.clone(),
    );
    (store, clock)
}

#[test]
fn test_full_user_flow() {
    let (mut store, clock) = new_store();

    // 1. Register A, which also logs in
    let alice = store
        .register_user("Alice", "alice@x.com", "Password1")
        .expect("Failed to register alice");
    assert_eq!(store.current_user().map(|u| u.id), Some(alice.id));

    // 2. Create post
    clock.advance(10);
    let post = store
        .create_post(alice.id, "Hello world", None)
        .expect("Failed to create post");
    let visible = store.list_visible_posts();
    assert_eq!(visible[0].id, post.id);
    assert!(visible[0].liked_by.is_empty());
    assert!(visible[0].comments.is_empty());
    assert_eq!(visible[0].author_name, "Alice");

    // 3. Like
    let liked = store.toggle_like(post.id, alice.id).unwrap();
    assert_eq!(liked.like_count(), 1);

    // 4. Comment
    store.add_comment(post.id, alice.id, "Nice!").unwrap();
    assert_eq!(store.post(post.id).unwrap().comments.len(), 1);

    // 5. B cannot delete A's post
    let bob = store.register_user("Bob", "bob@x.com", "Password2").unwrap();
    assert_eq!(store.delete_post(post.id, bob.id), Err(StoreError::NotOwner));
    assert!(store.list_visible_posts().iter().any(|p| p.id == post.id));
}

#[test]
fn test_registered_user_can_login() {
    let (mut store, _) = new_store();
    let users = [
        ("Ann", "ann@example.com", "abcdefg1"),
        ("Ben", "ben@example.org", "12345678x"),
        ("Cat", "cat@mail.co", "Secret99!"),
    ];
    for (name, email, password) in users {
        let created = store.register_user(name, email, password).unwrap();
        store.logout();
        let logged_in = store.login(email, password).unwrap();
        assert_eq!(created, logged_in);
        assert_eq!(store.current_user(), Some(&created));
    }
}

#[test]
fn test_duplicate_email_is_case_insensitive() {
    let (mut store, _) = new_store();
    store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let err = store
        .register_user("Other Alice", "ALICE@X.com", "Password9")
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateEmail);
    assert_eq!(store.users().len(), 1);
}

#[test]
fn test_login_is_case_insensitive_on_email() {
    let (mut store, _) = new_store();
    store.register_user("Alice", "Alice@X.com", "Password1").unwrap();
    store.logout();
    assert!(store.login("  alice@x.COM ", "Password1").is_ok());
}

#[test]
fn test_login_invalid_credentials() {
    let (mut store, _) = new_store();
    store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    store.logout();

    let wrong_password = store.login("alice@x.com", "Password2").unwrap_err();
    let unknown_email = store.login("nobody@x.com", "Password1").unwrap_err();
    assert_eq!(wrong_password, StoreError::InvalidCredentials);
    assert_eq!(unknown_email, StoreError::InvalidCredentials);
    assert!(store.current_user().is_none());
}

#[test]
fn test_signup_validation_reports_each_field() {
    let (mut store, _) = new_store();

    let err = store.register_user("  ", "not-an-email", "short").unwrap_err();
    assert_eq!(err.fields(), vec![Field::Name, Field::Email, Field::Password]);

    let err = store.register_user("Alice", "alice@x.com", "onlyletters").unwrap_err();
    assert_eq!(err.fields(), vec![Field::Password]);

    let err = store.register_user("Alice", "alice @x.com", "Password1").unwrap_err();
    assert_eq!(err.fields(), vec![Field::Email]);

    assert!(store.users().is_empty());
    assert!(store.current_user().is_none());
}

#[test]
fn test_logout_is_idempotent() {
    let (mut store, _) = new_store();
    store.logout();
    store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    store.logout();
    store.logout();
    assert!(store.current_user().is_none());
}

#[test]
fn test_post_content_validation() {
    let (mut store, _) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();

    assert_eq!(
        store.create_post(alice.id, "   \n\t", None),
        Err(StoreError::EmptyContent)
    );
    assert_eq!(
        store.create_post(4242, "orphan", None),
        Err(StoreError::NotFound {
            kind: EntityKind::User,
            id: 4242
        })
    );
    assert!(store.posts().is_empty());

    let post = store.create_post(alice.id, "  padded  ", None).unwrap();
    assert_eq!(post.text, "padded");
}

#[test]
fn test_create_prepends_to_storage_order() {
    let (mut store, clock) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let first = store.create_post(alice.id, "first", None).unwrap();
    clock.advance(5);
    let second = store.create_post(alice.id, "second", None).unwrap();

    let order: Vec<i64> = store.posts().iter().map(|p| p.id).collect();
    assert_eq!(order, vec![second.id, first.id]);
}

#[test]
fn test_ids_are_unique_within_one_millisecond() {
    let (mut store, _) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let a = store.create_post(alice.id, "a", None).unwrap();
    let b = store.create_post(alice.id, "b", None).unwrap();
    let c = store.add_comment(a.id, alice.id, "c").unwrap();

    assert_eq!(a.created_at, b.created_at);
    assert!(alice.id < a.id && a.id < b.id && b.id < c.id);
}

#[test]
fn test_edit_post() {
    let (mut store, clock) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let bob = store.register_user("Bob", "bob@x.com", "Password2").unwrap();
    let older = store.create_post(alice.id, "older", None).unwrap();
    clock.advance(1_000);
    let post = store
        .create_post(alice.id, "original", ImageRef::from_url("https://img.example/a.png"))
        .unwrap();

    assert_eq!(
        store.edit_post(post.id, bob.id, "hijack", ImageChange::Keep),
        Err(StoreError::NotOwner)
    );
    assert_eq!(
        store.edit_post(post.id, alice.id, "  ", ImageChange::Keep),
        Err(StoreError::EmptyContent)
    );
    assert_eq!(
        store.edit_post(999, alice.id, "x", ImageChange::Keep),
        Err(StoreError::post_not_found(999))
    );

    clock.advance(60_000);
    let edited = store
        .edit_post(post.id, alice.id, "updated", ImageChange::Keep)
        .unwrap();
    assert_eq!(edited.text, "updated");
    assert_eq!(edited.id, post.id);
    assert_eq!(edited.created_at, post.created_at);
    assert_eq!(edited.image_ref.as_deref(), Some("https://img.example/a.png"));
    assert_eq!(edited.edited_at, Some(post.created_at + 60_000));

    let edited = store
        .edit_post(post.id, alice.id, "updated", ImageChange::Remove)
        .unwrap();
    assert!(edited.image_ref.is_none());

    let order: Vec<i64> = store.posts().iter().map(|p| p.id).collect();
    assert_eq!(order, vec![post.id, older.id]);
}

#[test]
fn test_edit_without_changes_keeps_edit_time() {
    let (mut store, clock) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let post = store.create_post(alice.id, "same", None).unwrap();
    clock.advance(1_000);
    let edited = store
        .edit_post(post.id, alice.id, " same ", ImageChange::Keep)
        .unwrap();
    assert_eq!(edited.edited_at, None);
}

#[test]
fn test_delete_post() {
    let (mut store, _) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let post = store.create_post(alice.id, "bye", None).unwrap();

    assert_eq!(store.delete_post(post.id + 1, alice.id), Err(StoreError::post_not_found(post.id + 1)));
    store.delete_post(post.id, alice.id).unwrap();
    assert!(store.post(post.id).is_none());
    assert!(store.list_visible_posts().is_empty());
    assert_eq!(store.delete_post(post.id, alice.id), Err(StoreError::post_not_found(post.id)));
}

#[test]
fn test_toggle_like_round_trip() {
    let (mut store, _) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let bob = store.register_user("Bob", "bob@x.com", "Password2").unwrap();
    let post = store.create_post(alice.id, "like me", None).unwrap();
    store.toggle_like(post.id, bob.id).unwrap();
    let before = store.post(post.id).unwrap().clone();

    let once = store.toggle_like(post.id, alice.id).unwrap();
    assert_eq!(once.like_count(), 2);
    assert!(once.is_liked_by(alice.id));

    let twice = store.toggle_like(post.id, alice.id).unwrap();
    assert_eq!(twice.liked_by, before.liked_by);
    assert_eq!(twice.like_count(), 1);

    assert_eq!(
        store.toggle_like(12, alice.id),
        Err(StoreError::post_not_found(12))
    );
}

#[test]
fn test_comments_keep_append_order() {
    let (mut store, clock) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let post = store.create_post(alice.id, "talk to me", None).unwrap();

    for text in ["one", "two", "three"] {
        clock.advance(1);
        store.add_comment(post.id, alice.id, text).unwrap();
    }
    assert_eq!(
        store.add_comment(post.id, alice.id, "  "),
        Err(StoreError::EmptyContent)
    );
    assert_eq!(
        store.add_comment(post.id + 100, alice.id, "lost"),
        Err(StoreError::post_not_found(post.id + 100))
    );

    let texts: Vec<String> = store.post(post.id).unwrap().comments.iter().map(|c| c.text.clone()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn test_search_filter() {
    let (mut store, clock) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    for text in ["Ran a Marathon", "baked bread", "marathon training"] {
        clock.advance(1);
        store.create_post(alice.id, text, None).unwrap();
    }

    store.set_filter(Some(""), None);
    assert_eq!(store.list_visible_posts().len(), 3);

    store.set_filter(Some("MARATHON"), None);
    let texts: Vec<String> = store.list_visible_posts().into_iter().map(|p| p.text).collect();
    assert_eq!(texts, vec!["marathon training", "Ran a Marathon"]);

    store.set_filter(Some("skydiving"), None);
    assert!(store.list_visible_posts().is_empty());

    // sort only, search untouched
    store.set_filter(None, Some(SortMode::Oldest));
    assert_eq!(store.filter().search_text, "skydiving");

    store.clear_filters();
    assert_eq!(store.filter().sort_mode, SortMode::Latest);
    assert_eq!(store.list_visible_posts().len(), 3);
}

#[test]
fn test_sort_modes() {
    let (mut store, clock) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    let bob = store.register_user("Bob", "bob@x.com", "Password2").unwrap();

    let mut ids = Vec::new();
    for (i, text) in ["a", "b", "c", "d"].iter().enumerate() {
        clock.set(1_700_000_000_000 + (i as i64 + 1) * 1_000);
        ids.push(store.create_post(alice.id, text, None).unwrap().id);
    }
    store.toggle_like(ids[0], alice.id).unwrap();
    store.toggle_like(ids[0], bob.id).unwrap();
    store.toggle_like(ids[2], bob.id).unwrap();

    store.set_filter(None, Some(SortMode::Latest));
    let latest = store.list_visible_posts();
    assert!(latest.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(latest[0].text, "d");

    store.set_filter(None, Some(SortMode::Oldest));
    let oldest = store.list_visible_posts();
    assert!(oldest.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    assert_eq!(oldest[0].text, "a");

    store.set_filter(None, Some(SortMode::MostLiked));
    let liked = store.list_visible_posts();
    assert!(liked.windows(2).all(|w| w[0].like_count() >= w[1].like_count()));
    let texts: Vec<&str> = liked.iter().map(|p| p.text.as_str()).collect();
    // b and d have no likes and keep storage order (newest first)
    assert_eq!(texts, vec!["a", "c", "d", "b"]);
}

#[test]
fn test_latest_ties_keep_storage_order() {
    let (mut store, _) = new_store();
    let alice = store.register_user("Alice", "alice@x.com", "Password1").unwrap();
    store.create_post(alice.id, "first", None).unwrap();
    store.create_post(alice.id, "second", None).unwrap();

    let texts: Vec<String> = store.list_visible_posts().into_iter().map(|p| p.text).collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[test]
fn test_author_name_is_copied_at_creation() {
    let (mut store, _) = new_store();
    let alice = store.register_user("  Alice  ", "alice@x.com", "Password1").unwrap();
    assert_eq!(alice.name, "Alice");
    let post = store.create_post(alice.id, "hi", None).unwrap();
    assert_eq!(post.author_id, alice.id);
    assert_eq!(post.author_name, "Alice");
}
