use inspire::core::clock::IdGenerator;
use inspire::core::helpers::{is_valid_email, is_valid_password, non_empty_text, normalize_email};
use inspire::SortMode;

#[test]
fn test_email_pattern() {
    for ok in ["a@b.co", "alice@x.com", "first.last@sub.domain.org", "  padded@x.io  "] {
        assert!(is_valid_email(ok), "{} should be accepted", ok);
    }
    for bad in ["", "alice", "alice@x", "@x.com", "al ice@x.com", "alice@@x.com", "alice@x."] {
        assert!(!is_valid_email(bad), "{} should be rejected", bad);
    }
    assert_eq!(normalize_email("  Alice@X.COM "), "alice@x.com");
}

#[test]
fn test_password_policy() {
    for ok in ["Password1", "abcdefg1", "1234567a", "p@ss!w0rd"] {
        assert!(is_valid_password(ok), "{} should be accepted", ok);
    }
    for bad in ["Pass1", "password", "12345678", "pass word1", "Pässword1"] {
        assert!(!is_valid_password(bad), "{} should be rejected", bad);
    }
}

#[test]
fn test_non_empty_text() {
    assert_eq!(non_empty_text(" \t\n"), None);
    assert_eq!(non_empty_text("  hi there "), Some("hi there".to_string()));
}

#[test]
fn test_id_generator_never_repeats() {
    let mut ids = IdGenerator::starting_after(100);
    assert_eq!(ids.next(50), 101);
    assert_eq!(ids.next(500), 500);
    assert_eq!(ids.next(500), 501);
    assert_eq!(ids.next(499), 502);
}

#[test]
fn test_sort_mode_parsing() {
    assert_eq!("latest".parse::<SortMode>(), Ok(SortMode::Latest));
    assert_eq!("Oldest".parse::<SortMode>(), Ok(SortMode::Oldest));
    assert_eq!("likes".parse::<SortMode>(), Ok(SortMode::MostLiked));
    assert_eq!("most-liked".parse::<SortMode>(), Ok(SortMode::MostLiked));
    assert!("random".parse::<SortMode>().is_err());
    assert_eq!(SortMode::MostLiked.to_string(), "likes");
}
