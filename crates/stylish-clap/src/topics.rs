//! Help topics listed under "Additional help topics".
//!
//! A topic is a named page of text that isn't a command. Topics appear in
//! the root command's usage and are shown by `app help <topic>`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use deunicode::deunicode;

use crate::error::{HelpError, Result};

#[derive(Debug, Clone)]
pub struct Topic {
    pub name: String,
    pub title: String,
    pub content: String,
}

impl Topic {
    /// Creates a new topic. Without a name, one is slugged from the title.
    pub fn new(title: impl Into<String>, content: impl Into<String>, name: Option<String>) -> Self {
        let title = title.into();
        let name = name.unwrap_or_else(|| Self::generate_slug(&title));
        Self {
            name,
            title,
            content: content.into(),
        }
    }

    fn generate_slug(title: &str) -> String {
        let mut slug: String = deunicode(title)
            .to_lowercase()
            .replace(' ', "-")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        while slug.contains("--") {
            slug = slug.replace("--", "-");
        }
        slug
    }

    /// The topic as shown by `help <topic>`.
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n", self.title, self.content.trim_end())
    }
}

#[derive(Debug, Default, Clone)]
pub struct TopicRegistry {
    topics: HashMap<String, Topic>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a topic. Names must be unique.
    pub fn add_topic(&mut self, topic: Topic) -> Result<()> {
        if self.topics.contains_key(&topic.name) {
            return Err(HelpError::DuplicateTopic(topic.name));
        }
        self.topics.insert(topic.name.clone(), topic);
        Ok(())
    }

    pub fn get_topic(&self, name: &str) -> Option<&Topic> {
        self.topics.get(name)
    }

    /// Topics sorted by name.
    pub fn list_topics(&self) -> Vec<&Topic> {
        let mut topics: Vec<&Topic> = self.topics.values().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Adds every `.txt` and `.md` file in `path` as a topic.
    ///
    /// The name is the file stem, the title is the first non-blank line and
    /// the content is the rest. Files without a body are skipped.
    pub fn add_from_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(HelpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("topic directory not found: {}", path.display()),
            )));
        }

        let mut entries: Vec<_> = fs::read_dir(path)?.collect::<std::io::Result<_>>()?;
        entries.sort_by_key(|e| e.path());

        for entry in entries {
            let file = entry.path();
            if !file.is_file() {
                continue;
            }
            match file.extension().and_then(|e| e.to_str()) {
                Some("txt") | Some("md") => {}
                _ => continue,
            }

            let source = fs::read_to_string(&file)?;
            let lines: Vec<&str> = source.lines().collect();
            let Some(title_idx) = lines.iter().position(|l| !l.trim().is_empty()) else {
                continue;
            };
            let body = lines[title_idx + 1..].join("\n").trim().to_string();
            if body.is_empty() {
                continue;
            }

            let name = file
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string);
            self.add_topic(Topic::new(lines[title_idx].trim(), body, name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_slug_generation() {
        assert_eq!(Topic::generate_slug("Hello World"), "hello-world");
        assert_eq!(Topic::generate_slug("Testing  123"), "testing-123");
        assert_eq!(Topic::generate_slug("Olá Mundo"), "ola-mundo");
    }

    #[test]
    fn test_explicit_name_wins() {
        let topic = Topic::new("Environment Variables", "...", Some("env".into()));
        assert_eq!(topic.name, "env");
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let mut registry = TopicRegistry::new();
        registry.add_topic(Topic::new("Config", "a", None)).unwrap();
        let err = registry.add_topic(Topic::new("Config", "b", None)).unwrap_err();
        assert!(matches!(err, HelpError::DuplicateTopic(name) if name == "config"));
    }

    #[test]
    fn test_list_sorted() {
        let mut registry = TopicRegistry::new();
        registry.add_topic(Topic::new("Zebra", "z", None)).unwrap();
        registry.add_topic(Topic::new("Apple", "a", None)).unwrap();
        let names: Vec<_> = registry.list_topics().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "zebra"]);
    }

    #[test]
    fn test_render() {
        let topic = Topic::new("Config", "Put it in ~/.apprc\n\n", None);
        assert_eq!(topic.render(), "Config\n\nPut it in ~/.apprc\n");
    }

    #[test]
    fn test_add_from_directory() {
        let dir = tempdir().unwrap();

        let mut f = File::create(dir.path().join("colors.md")).unwrap();
        writeln!(f, "\nColor Output\n\nSet NO_COLOR to disable.").unwrap();

        let mut f = File::create(dir.path().join("empty.txt")).unwrap();
        writeln!(f, "Only a title").unwrap();

        File::create(dir.path().join("ignored.rs")).unwrap();

        let mut registry = TopicRegistry::new();
        registry.add_from_directory(dir.path()).unwrap();

        let topic = registry.get_topic("colors").unwrap();
        assert_eq!(topic.title, "Color Output");
        assert_eq!(topic.content, "Set NO_COLOR to disable.");
        assert!(registry.get_topic("empty").is_none());
        assert!(registry.get_topic("ignored").is_none());
    }

    #[test]
    fn test_add_from_missing_directory() {
        let mut registry = TopicRegistry::new();
        let err = registry.add_from_directory("/no/such/dir").unwrap_err();
        assert!(matches!(err, HelpError::Io(_)));
    }
}
