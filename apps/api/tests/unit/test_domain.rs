use travelog::domain::{
    entry::{entity::EntryKind, value_objects::YoutubeUrl},
    identity::{entity::Identity, value_objects::GuestId},
    social::{
        comment::{Comment, CommentAuthor, DEFAULT_GUEST_NAME, MAX_DISPLAY_NAME_CHARS},
        reaction::{ReactionKind, ReactionSet, Reactor},
    },
};

#[test]
fn youtube_links_follow_known_shapes() {
    for ok in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "youtube.com/shorts/dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ",
    ] {
        assert!(YoutubeUrl::new(ok.to_string()).is_ok(), "{ok} should be valid");
    }
    for bad in [
        "https://youtu.be/short",
        "https://vimeo.com/123456789",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10",
    ] {
        assert!(YoutubeUrl::new(bad.to_string()).is_err(), "{bad} should be invalid");
    }
}

#[test]
fn guest_ids_are_bounded_url_safe_tokens() {
    assert!(GuestId::new("device_01-A".to_string()).is_ok());
    assert!(GuestId::new("a".repeat(64)).is_ok());
    assert!(GuestId::new("a".repeat(65)).is_err());
    assert!(GuestId::new("has space".to_string()).is_err());
    assert!(GuestId::new(String::new()).is_err());
}

#[test]
fn reaction_kinds_accept_singular_and_plural() {
    assert_eq!("likes".parse::<ReactionKind>(), Ok(ReactionKind::Like));
    assert_eq!("heart".parse::<ReactionKind>(), Ok(ReactionKind::Heart));
    assert!("wow".parse::<ReactionKind>().is_err());
}

#[test]
fn toggled_identity_lands_in_exactly_one_list() {
    let mut set = ReactionSet::default();
    let guest = Reactor::Guest("g-1".into());
    let member = Reactor::Member("m-1".into());

    set.toggle(ReactionKind::Like, &guest);
    set.toggle(ReactionKind::Like, &member);

    assert_eq!(set.guest_likes, vec!["g-1".to_string()]);
    assert_eq!(set.likes, vec!["m-1".to_string()]);
    assert_eq!(set.count(ReactionKind::Like), 2);

    let before = set.clone();
    set.toggle(ReactionKind::Heart, &guest);
    set.toggle(ReactionKind::Heart, &guest);
    assert_eq!(set, before);
}

#[test]
fn guest_display_names_are_trimmed_and_capped() {
    let long = "n".repeat(MAX_DISPLAY_NAME_CHARS + 20);
    let comment = Comment::compose("hello", &Identity::Anonymous, Some(&long)).unwrap();
    match comment.author {
        CommentAuthor::Guest { display_name } => {
            assert_eq!(display_name.chars().count(), MAX_DISPLAY_NAME_CHARS)
        }
        other => panic!("expected guest author, got {other:?}"),
    }

    let comment = Comment::compose("hello", &Identity::Anonymous, Some("   ")).unwrap();
    assert_eq!(
        comment.author,
        CommentAuthor::Guest {
            display_name: DEFAULT_GUEST_NAME.to_string()
        }
    );
}

#[test]
fn entry_kinds_name_their_collections() {
    assert_eq!(EntryKind::Post.as_str(), "post");
    assert_eq!(EntryKind::Gallery.label(), "Image");
}
