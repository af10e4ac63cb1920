use tracing::info;

use crate::config::StorageKeys;
use crate::core::errors::StoreResult;
use crate::core::kv::KeyValue;
use crate::store::PersistedStore;

struct DemoUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    posts: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Alice",
        email: "alice@example.com",
        password: "Password1",
        posts: &[
            "Finished my first marathon today! Never thought I could do it.",
            "Just shipped the side project I've been working on for months.",
        ],
    },
    DemoUser {
        name: "Bob",
        email: "bob@example.com",
        password: "Password2",
        posts: &["Learned to bake sourdough this weekend. Ten tries, one great loaf."],
    },
];

/// Adds the demo accounts and their posts when they are not there yet.
/// Whoever was logged in before stays logged in.
pub fn seed_demo_data<K: KeyValue>(store: &mut PersistedStore<K>) -> StoreResult<usize> {
    let previous_session = store.session.clone();
    let mut created = 0;

    for demo in DEMO_USERS {
        if store.find_user_by_email(demo.email).is_some() {
            continue;
        }
        let user = store.register_user(demo.name, demo.email, demo.password)?;
        for text in demo.posts {
            store.create_post(user.id, text, None)?;
        }
        created += 1;
    }

    if created > 0 {
        store.session = previous_session;
        store.persist_session();
        info!(created, "demo data seeded");
    }
    Ok(created)
}

/// Deletes every record the application keeps, theme included.
pub fn reset_storage(kv: &mut impl KeyValue, keys: &StorageKeys) -> anyhow::Result<()> {
    for key in keys.all() {
        kv.delete(key)?;
    }
    info!("storage reset");
    Ok(())
}
