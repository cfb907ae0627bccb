//! Prototype-only social links. Never persisted.

use serde::{Deserialize, Serialize};

/// Supported link platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
    Github,
    Website,
    Instagram,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Linkedin => "Linkedin",
            Self::Github => "Github",
            Self::Website => "Website",
            Self::Instagram => "Instagram",
        }
    }
}

/// One social link in the prototype state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: u64,
    pub platform: Platform,
    pub url: String,
}

/// Insertion-ordered link collection with splice-based reorder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkList {
    links: Vec<SocialLink>,
    next_id: u64,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seed links every prototype starts with.
    pub fn seeded() -> Self {
        let mut list = Self::new();
        list.add(Platform::Twitter, "twitter.com/sarahj");
        list.add(Platform::Linkedin, "linkedin.com/in/sarahj");
        list.add(Platform::Github, "github.com/sarahj");
        list
    }

    pub fn links(&self) -> &[SocialLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Append a link, returning its id.
    pub fn add(&mut self, platform: Platform, url: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.links.push(SocialLink {
            id,
            platform,
            url: url.into(),
        });
        id
    }

    pub fn remove(&mut self, id: u64) {
        self.links.retain(|link| link.id != id);
    }

    pub fn set_url(&mut self, id: u64, url: impl Into<String>) {
        if let Some(link) = self.links.iter_mut().find(|link| link.id == id) {
            link.url = url.into();
        }
    }

    pub fn set_platform(&mut self, id: u64, platform: Platform) {
        if let Some(link) = self.links.iter_mut().find(|link| link.id == id) {
            link.platform = platform;
        }
    }

    /// Drag-reorder: remove the link, then reinsert it at `to_index`
    /// (clamped to the end). Order is whatever the list looks like
    /// after the reinsertion.
    pub fn reorder(&mut self, id: u64, to_index: usize) {
        let Some(from) = self.links.iter().position(|link| link.id == id) else {
            return;
        };
        let link = self.links.remove(from);
        let to = to_index.min(self.links.len());
        self.links.insert(to, link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platforms(list: &LinkList) -> Vec<Platform> {
        list.links().iter().map(|link| link.platform).collect()
    }

    #[test]
    fn links_keep_insertion_order() {
        let list = LinkList::seeded();
        assert_eq!(
            platforms(&list),
            vec![Platform::Twitter, Platform::Linkedin, Platform::Github]
        );
    }

    #[test]
    fn add_and_remove() {
        let mut list = LinkList::seeded();
        let id = list.add(Platform::Website, "sarahj.design");
        assert_eq!(list.len(), 4);

        list.remove(id);
        assert_eq!(list.len(), 3);
        assert!(list.links().iter().all(|link| link.id != id));
    }

    #[test]
    fn update_platform_and_url_in_place() {
        let mut list = LinkList::seeded();
        let id = list.links()[0].id;

        list.set_platform(id, Platform::Instagram);
        list.set_url(id, "instagram.com/sarahj");

        assert_eq!(list.links()[0].platform, Platform::Instagram);
        assert_eq!(list.links()[0].url, "instagram.com/sarahj");
    }

    #[test]
    fn reorder_moves_to_target_index() {
        let mut list = LinkList::seeded();
        let github = list.links()[2].id;

        list.reorder(github, 0);

        assert_eq!(
            platforms(&list),
            vec![Platform::Github, Platform::Twitter, Platform::Linkedin]
        );
    }

    #[test]
    fn reorder_past_the_end_clamps() {
        let mut list = LinkList::seeded();
        let twitter = list.links()[0].id;

        list.reorder(twitter, 99);

        assert_eq!(
            platforms(&list),
            vec![Platform::Linkedin, Platform::Github, Platform::Twitter]
        );
    }

    #[test]
    fn reorder_of_unknown_id_is_a_no_op() {
        let mut list = LinkList::seeded();
        let before = list.clone();
        list.reorder(999, 0);
        assert_eq!(list, before);
    }
}
