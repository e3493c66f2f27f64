use super::{TrendItem, TrendKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub caption: String,
    pub image_url: String,
}

/// The formatted, ready-to-send message bundle for one run.
/// Composed once from the aggregated trend list, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Digest {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl Digest {
    /// Pure composition: aggregated items plus the keyword-only trend list.
    /// No network or file I/O happens here.
    pub fn compose(items: &[TrendItem], keywords: &[TrendItem]) -> Self {
        let mut text = String::from("\u{1f525} Hot right now \u{1f525}");

        Self::push_section(
            &mut text,
            "\u{1f3a5} Trending videos",
            items.iter().filter(|i| i.kind == TrendKind::Video),
        );
        Self::push_section(
            &mut text,
            "\u{1f4e3} Trending posts",
            items.iter().filter(|i| i.kind == TrendKind::SocialPost),
        );
        Self::push_section(&mut text, "\u{1f426} Social trends", keywords.iter());

        let attachments = items
            .iter()
            .filter_map(|item| {
                item.thumbnail_url.as_ref().map(|thumb| Attachment {
                    caption: Self::link(item),
                    image_url: thumb.clone(),
                })
            })
            .collect();

        Self { text, attachments }
    }

    pub fn is_empty(&self) -> bool {
        // Header only, nothing underneath
        !self.text.contains('\n')
    }

    fn push_section<'a>(
        text: &mut String,
        heading: &str,
        items: impl Iterator<Item = &'a TrendItem>,
    ) {
        let mut items = items.peekable();
        if items.peek().is_none() {
            return;
        }

        text.push_str("\n\n");
        text.push_str(heading);
        text.push('\n');
        for item in items {
            text.push_str("- ");
            text.push_str(&Self::link(item));
            text.push('\n');
        }
    }

    /// `[title](url)` when a link exists, bare title otherwise
    fn link(item: &TrendItem) -> String {
        match &item.url {
            Some(url) => format!("[{}]({})", item.title, url),
            None => item.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str, thumb: Option<&str>) -> TrendItem {
        TrendItem::new(TrendKind::Video, id.to_string(), title.to_string())
            .with_url(Some(format!("https://www.youtube.com/watch?v={}", id)))
            .with_thumbnail(thumb.map(|t| t.to_string()))
    }

    fn keyword(name: &str, url: Option<&str>) -> TrendItem {
        TrendItem::new(TrendKind::Keyword, name.to_string(), name.to_string())
            .with_url(url.map(|u| u.to_string()))
    }

    #[test]
    fn test_compose_sections_in_order() {
        let items = vec![
            video("v1", "First video", Some("https://img/v1.jpg")),
            video("v2", "Second video", None),
        ];
        let keywords = vec![keyword("breaking", Some("https://twitter.com/search?q=breaking"))];

        let digest = Digest::compose(&items, &keywords);

        let videos_at = digest.text.find("Trending videos").unwrap();
        let trends_at = digest.text.find("Social trends").unwrap();
        assert!(videos_at < trends_at);
        assert!(digest
            .text
            .contains("- [First video](https://www.youtube.com/watch?v=v1)"));
        assert!(digest
            .text
            .contains("- [breaking](https://twitter.com/search?q=breaking)"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let items = vec![video("v1", "Only video", None)];
        let digest = Digest::compose(&items, &[]);

        assert!(digest.text.contains("Trending videos"));
        assert!(!digest.text.contains("Social trends"));
        assert!(!digest.text.contains("Trending posts"));
    }

    #[test]
    fn test_keyword_without_url_renders_bare() {
        let digest = Digest::compose(&[], &[keyword("plain trend", None)]);
        assert!(digest.text.contains("- plain trend\n"));
        assert!(!digest.text.contains("[plain trend]"));
    }

    #[test]
    fn test_attachments_only_for_thumbnails() {
        let items = vec![
            video("v1", "With thumb", Some("https://img/v1.jpg")),
            video("v2", "No thumb", None),
            video("v3", "Also thumb", Some("https://img/v3.jpg")),
        ];

        let digest = Digest::compose(&items, &[]);

        assert_eq!(digest.attachments.len(), 2);
        assert_eq!(digest.attachments[0].image_url, "https://img/v1.jpg");
        assert_eq!(
            digest.attachments[0].caption,
            "[With thumb](https://www.youtube.com/watch?v=v1)"
        );
        assert_eq!(digest.attachments[1].image_url, "https://img/v3.jpg");
    }

    #[test]
    fn test_social_posts_get_their_own_section() {
        let items = vec![TrendItem::new(
            TrendKind::SocialPost,
            "https://example.com/p/1".to_string(),
            "A post".to_string(),
        )
        .with_url(Some("https://example.com/p/1".to_string()))];

        let digest = Digest::compose(&items, &[]);
        assert!(digest.text.contains("Trending posts"));
    }

    #[test]
    fn test_is_empty() {
        assert!(Digest::compose(&[], &[]).is_empty());
        assert!(!Digest::compose(&[video("v", "t", None)], &[]).is_empty());
    }
}
