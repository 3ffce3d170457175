//! The section catalogue: ids, headings, placeholders and empty notices

use super::state::{Bar, Shape};

pub const FAILED_MESSAGE: &str = "This section could not be loaded.";

/// One independently loading region of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Contact,
    Work,
    Education,
    Projects,
    Posts,
}

impl SectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Contact => "contact",
            SectionKind::Work => "work",
            SectionKind::Education => "education",
            SectionKind::Projects => "projects",
            SectionKind::Posts => "posts",
        }
    }

    /// DOM id of the section's slot
    pub fn id(self) -> String {
        format!("section-{}", self.name())
    }

    pub fn template(self) -> String {
        format!("sections/{}.html", self.name())
    }

    /// Heading shown above empty and failed notices
    pub fn title(self) -> Option<&'static str> {
        match self {
            SectionKind::Hero | SectionKind::Contact => None,
            SectionKind::Work => Some("Work Experience"),
            SectionKind::Education => Some("Education"),
            SectionKind::Projects => Some("Projects"),
            SectionKind::Posts => Some("Blog Posts"),
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            SectionKind::Hero | SectionKind::Contact => "No profile found.",
            SectionKind::Work => "No work experience yet.",
            SectionKind::Education => "No education listed yet.",
            SectionKind::Projects => "No projects yet.",
            SectionKind::Posts => "No posts found.",
        }
    }

    /// Placeholder drawn while the section's data is pending
    ///
    /// Shapes approximate the populated markup so the page does not jump
    /// when real content arrives.
    pub fn placeholder(self) -> Shape {
        match self {
            SectionKind::Hero => Shape {
                class: "hero",
                heading: false,
                repeat: 1,
                rows: vec![
                    vec![Bar::block("60%", "2.5em")],
                    vec![Bar::line("40%")],
                    vec![Bar::circle("24px"); 4],
                    vec![Bar::block("100%", "6em")],
                ],
            },
            SectionKind::Contact => Shape {
                class: "contact",
                heading: false,
                repeat: 1,
                rows: vec![
                    vec![Bar::circle("192px")],
                    vec![Bar::line("80%")],
                    vec![Bar::line("80%")],
                ],
            },
            SectionKind::Work => Shape {
                class: "list",
                heading: true,
                repeat: 3,
                rows: vec![
                    vec![Bar::line("60%"), Bar::line("30%")],
                    vec![Bar::line("70%")],
                    vec![Bar::line("90%")],
                    vec![Bar::line("90%")],
                    vec![Bar::line("90%")],
                ],
            },
            SectionKind::Education => Shape {
                class: "list",
                heading: true,
                repeat: 2,
                rows: vec![
                    vec![Bar::line("70%")],
                    vec![Bar::line("80%")],
                    vec![Bar::line("30%")],
                ],
            },
            SectionKind::Projects => Shape {
                class: "cards",
                heading: true,
                repeat: 2,
                rows: vec![
                    vec![Bar::block("100%", "160px")],
                    vec![Bar::line("70%")],
                    vec![Bar::block("90%", "3em")],
                    vec![Bar::block("40%", "1.5em")],
                ],
            },
            SectionKind::Posts => Shape {
                class: "list",
                heading: true,
                repeat: 3,
                rows: vec![vec![Bar::line("60%")], vec![Bar::line("90%")]],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SectionKind; 6] = [
        SectionKind::Hero,
        SectionKind::Contact,
        SectionKind::Work,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Posts,
    ];

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = ALL.iter().map(|k| k.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ALL.len());
        assert_eq!(SectionKind::Work.id(), "section-work");
    }

    #[test]
    fn test_placeholder_shapes() {
        assert_eq!(SectionKind::Work.placeholder().repeat, 3);
        assert_eq!(SectionKind::Education.placeholder().repeat, 2);
        assert_eq!(SectionKind::Projects.placeholder().class, "cards");
        assert_eq!(SectionKind::Posts.placeholder().bar_count(), 7);

        let hero = SectionKind::Hero.placeholder();
        let circles = hero.rows.iter().flatten().filter(|b| b.round).count();
        assert_eq!(circles, 4);
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(SectionKind::Posts.empty_message(), "No posts found.");
        assert_eq!(SectionKind::Hero.title(), None);
        assert_eq!(SectionKind::Projects.title(), Some("Projects"));
    }
}
