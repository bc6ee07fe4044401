use regex::Regex;

/// Extract the 11-character video id from a YouTube URL (watch, embed, and
/// shortlink forms) and return its poster-frame image URL.
pub fn youtube_thumbnail(url: &str) -> Option<String> {
    let pattern = Regex::new(
        r#"(?i)(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("youtube pattern must compile");

    let id = pattern.captures(url)?.get(1)?.as_str();
    Some(format!("https://img.youtube.com/vi/{id}/0.jpg"))
}

#[cfg(test)]
mod tests {
    use super::youtube_thumbnail;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            youtube_thumbnail("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            youtube_thumbnail("https://youtu.be/dQw4w9WgXcQ"),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".to_string())
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            youtube_thumbnail("youtube.com/embed/dQw4w9WgXcQ"),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".to_string())
        );
    }

    #[test]
    fn test_non_youtube_url() {
        assert_eq!(youtube_thumbnail("https://vimeo.com/123456789"), None);
        assert_eq!(youtube_thumbnail(""), None);
    }
}
