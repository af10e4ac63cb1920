use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inspire::core::db::{reset_storage, seed_demo_data};
use inspire::display::{author_label, format_relative, share_payload};
use inspire::theme::{load_theme, save_theme, toggle_theme};
use inspire::{
    Clock, FileKv, ImageChange, ImageRef, PersistedStore, Post, SortMode, StoreError, SystemClock,
    Theme, User,
};

#[derive(Parser, Debug)]
#[command(name = "inspire", about = "Share to Inspire: share achievements with your friends")]
struct Args {
    /// Directory holding the persisted records
    #[arg(long, env = "INSPIRE_DATA_DIR", default_value = inspire::config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in
    Signup { name: String, email: String, password: String },
    Login { email: String, password: String },
    Logout,
    Whoami,
    /// Share a new post
    Post {
        text: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        image_file: Option<PathBuf>,
    },
    Edit {
        id: i64,
        text: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        image_file: Option<PathBuf>,
        #[arg(long, conflicts_with_all = ["image_url", "image_file"])]
        remove_image: bool,
    },
    Delete { id: i64 },
    Like { id: i64 },
    Comment { id: i64, text: String },
    /// Show the comments on a post, oldest first
    Comments { id: i64 },
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "latest")]
        sort: SortMode,
    },
    Share {
        id: i64,
        #[arg(long, default_value = "https://share-to-inspire.local/")]
        url: String,
    },
    /// Show, set (light/dark) or toggle the theme
    Theme { mode: Option<String> },
    /// Add demo accounts and posts
    Seed,
    /// Remove every stored record
    Reset,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("inspire={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let kv = FileKv::open(&args.data_dir)?;
    let mut store = PersistedStore::open(kv);

    let result = run(&mut store, args.command);

    if let inspire::Durability::Degraded { failures } = store.durability() {
        for (key, reason) in failures {
            eprintln!("Warning: changes to {} were not saved ({})", key, reason);
        }
    }
    result
}

fn run(store: &mut PersistedStore<FileKv>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Signup { name, email, password } => {
            let user = store.register_user(&name, &email, &password).map_err(explain)?;
            println!("Account created successfully! Welcome, {}.", user.name);
        }
        Command::Login { email, password } => {
            let user = store.login(&email, &password).map_err(explain)?;
            println!("Welcome back, {}!", user.name);
        }
        Command::Logout => {
            store.logout();
            println!("See you soon!");
        }
        Command::Whoami => match store.current_user() {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("Not logged in"),
        },
        Command::Post { text, image_url, image_file } => {
            let user = session_user(store)?;
            let image = read_image(image_file, image_url)?;
            let post = store.create_post(user.id, &text, image).map_err(explain)?;
            println!("Achievement shared! (post {})", post.id);
        }
        Command::Edit { id, text, image_url, image_file, remove_image } => {
            let user = session_user(store)?;
            let change = if remove_image {
                ImageChange::Remove
            } else {
                match read_image(image_file, image_url)? {
                    Some(image) => ImageChange::Replace(image),
                    None => ImageChange::Keep,
                }
            };
            store.edit_post(id, user.id, &text, change).map_err(explain)?;
            println!("Post updated successfully!");
        }
        Command::Delete { id } => {
            let user = session_user(store)?;
            store.delete_post(id, user.id).map_err(explain)?;
            println!("Post deleted");
        }
        Command::Like { id } => {
            let user = session_user(store)?;
            let post = store.toggle_like(id, user.id).map_err(explain)?;
            let verb = if post.is_liked_by(user.id) { "Liked" } else { "Unliked" };
            println!("{} post {} ({} likes)", verb, post.id, post.like_count());
        }
        Command::Comment { id, text } => {
            let user = session_user(store)?;
            store.add_comment(id, user.id, &text).map_err(explain)?;
            let count = store.post(id).map(|p| p.comments.len()).unwrap_or(0);
            println!("Comment added ({} comments)", count);
        }
        Command::Comments { id } => {
            let post = store
                .post(id)
                .ok_or_else(|| explain(StoreError::post_not_found(id)))?;
            if post.comments.is_empty() {
                println!("No comments yet. Be the first to comment!");
            }
            let now = SystemClock.now_millis();
            for comment in &post.comments {
                println!(
                    "{} ({}): {}",
                    author_label(store.users(), comment.author_id),
                    format_relative(comment.created_at, now),
                    comment.text
                );
            }
        }
        Command::List { search, sort } => {
            session_user(store)?;
            store.set_filter(search.as_deref(), Some(sort));
            let posts = store.list_visible_posts();
            if posts.is_empty() {
                if store.filter().search_text.is_empty() {
                    println!("No posts yet. Be the first to share an achievement!");
                } else {
                    println!("No posts found. Try adjusting your search terms.");
                }
            }
            let viewer = store.current_user().map(|u| u.id);
            for post in &posts {
                print_post(post, viewer);
            }
        }
        Command::Share { id, url } => {
            let post = store
                .post(id)
                .ok_or_else(|| explain(StoreError::post_not_found(id)))?;
            let payload = share_payload(post);
            println!("{}", payload.title);
            println!("{}", payload.clipboard_text(&url));
        }
        Command::Theme { mode } => {
            let keys = store.keys().clone();
            let theme = match mode.as_deref() {
                None => load_theme(store.kv(), &keys),
                Some("toggle") => toggle_theme(store.kv_mut(), &keys),
                Some(other) => {
                    let theme: Theme = other.parse().map_err(|e: String| anyhow!(e))?;
                    save_theme(store.kv_mut(), &keys, theme);
                    theme
                }
            };
            println!("Theme: {}", theme);
        }
        Command::Seed => {
            let created = seed_demo_data(store).map_err(explain)?;
            println!("Seeded {} demo accounts", created);
        }
        Command::Reset => {
            let keys = store.keys().clone();
            reset_storage(store.kv_mut(), &keys)?;
            store.load();
            println!("All data removed");
        }
    }
    Ok(())
}

fn session_user(store: &PersistedStore<FileKv>) -> anyhow::Result<User> {
    store
        .current_user()
        .cloned()
        .ok_or_else(|| anyhow!("Please log in first"))
}

fn read_image(file: Option<PathBuf>, url: Option<String>) -> anyhow::Result<Option<ImageRef>> {
    let bytes = match &file {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("Error loading image {}", path.display()))?,
        ),
        None => None,
    };
    let upload = file.as_deref().zip(bytes.as_deref());
    Ok(ImageRef::from_inputs(upload, url.as_deref())?)
}

fn print_post(post: &Post, viewer: Option<i64>) {
    let now = SystemClock.now_millis();
    let heart = if viewer.map(|id| post.is_liked_by(id)).unwrap_or(false) { "♥" } else { "♡" };
    println!("#{} {} · {}", post.id, post.author_name, format_relative(post.created_at, now));
    println!("  {}", post.text);
    if let Some(image) = &post.image_ref {
        if image.starts_with("data:") {
            println!("  [embedded image]");
        } else {
            println!("  [image] {}", image);
        }
    }
    println!("  {} {}  💬 {}", heart, post.like_count(), post.comments.len());
}

fn explain(err: StoreError) -> anyhow::Error {
    if let StoreError::Validation(errors) = &err {
        let lines: Vec<String> = errors.iter().map(|e| format!("  {}", e)).collect();
        return anyhow!("Please fix the errors in the form:\n{}", lines.join("\n"));
    }
    anyhow!(err)
}
