//! Shared content types for the Signpost CMS.
//!
//! These types are the wire format between the gateway and its consumers.
//! Collection records all carry a server-assigned `id` and an `active` flag;
//! `AboutContent` and `Settings` are singletons with exactly one logical
//! instance. Icon, color, priority and form-type names are closed enums so a
//! bad name is rejected at write time instead of failing at render time.

use serde::{Deserialize, Serialize};

// =============================================================================
// Closed enumerations
// =============================================================================

/// Renderable icon identifiers the site knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    GraduationCap,
    Calendar,
    Heart,
    Trees,
    Home,
    Users,
    Briefcase,
    Clock,
    TrendingUp,
}

/// Theme color slots. "secondary" renders red, "accent" renders gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Secondary,
    Accent,
}

/// Announcement priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// The forms the public site can submit.
///
/// `Chapter`, `Event`, `Network` and `Leadership` are program-specific
/// application forms; the rest are the general site forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Contact,
    Volunteer,
    Partner,
    Newsletter,
    Chapter,
    Event,
    Network,
    Leadership,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Volunteer => "volunteer",
            Self::Partner => "partner",
            Self::Newsletter => "newsletter",
            Self::Chapter => "chapter",
            Self::Event => "event",
            Self::Network => "network",
            Self::Leadership => "leadership",
        }
    }

    /// Capitalized label for notification subjects.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Volunteer => "Volunteer",
            Self::Partner => "Partner",
            Self::Newsletter => "Newsletter",
            Self::Chapter => "Chapter",
            Self::Event => "Event",
            Self::Network => "Network",
            Self::Leadership => "Leadership",
        }
    }

    /// Whether this is a program application rather than a general site form.
    pub fn is_program_application(&self) -> bool {
        matches!(
            self,
            Self::Chapter | Self::Event | Self::Network | Self::Leadership
        )
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Collection records
// =============================================================================

/// A program the network runs, with a slug for detail-page routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub title: String,
    pub description: String,
    pub frequency: String,
    pub location: String,
    pub impact: String,
    pub icon: Icon,
    pub color: Color,
    pub active: bool,
    pub slug: String,
}

/// A scheduled service event. `date` is an ISO date, `time` is free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub active: bool,
}

/// A site-wide announcement. `date` is set by the server at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: String,
    pub priority: Priority,
    pub active: bool,
}

/// A volunteer opportunity listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub active: bool,
}

/// A headline statistic. `value` is a display string ("1,000+"), not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub id: String,
    pub label: String,
    pub value: String,
    pub description: String,
    pub icon: Icon,
    pub color: Color,
}

/// An impact story card with a hero image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactStory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub active: bool,
}

// =============================================================================
// Singletons
// =============================================================================

/// Mission and story copy for the About page. Singleton; update-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutContent {
    pub mission: String,
    pub story: String,
}

/// Site settings. Singleton; update-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub donate_enabled: bool,
    pub email_notifications: String,
}

// =============================================================================
// Bulk snapshot
// =============================================================================

/// The combined result of reading every collection and singleton in one call
/// (`GET /api/cms/all`). This is the unit the client cache holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllContent {
    pub programs: Vec<Program>,
    pub events: Vec<Event>,
    pub announcements: Vec<Announcement>,
    pub opportunities: Vec<Opportunity>,
    pub stats: Vec<Stat>,
    pub impact_stories: Vec<ImpactStory>,
    pub about: AboutContent,
    pub settings: Settings,
}

impl AllContent {
    /// Programs visible on the public site.
    pub fn active_programs(&self) -> Vec<&Program> {
        self.programs.iter().filter(|p| p.active).collect()
    }

    /// Events visible on the public site, ascending by date.
    pub fn upcoming_events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().filter(|e| e.active).collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        events
    }
}

/// Receipt returned by the form submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub success: bool,
    pub message: String,
}

// =============================================================================
// Create payloads
// =============================================================================
//
// `id` and `active` are never client-supplied for new records; the server
// assigns both. Each payload knows its own required-field set.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProgram {
    pub title: String,
    pub description: String,
    pub frequency: String,
    pub location: String,
    pub impact: String,
    pub icon: Icon,
    pub color: Color,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewImpactStory {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Split a comma-separated skills field into a clean list.
///
/// The admin form collects skills as free text ("Leadership, Event Planning,");
/// entries are trimmed and empties dropped.
pub fn skills_from_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Partial-update payloads
// =============================================================================
//
// Merge semantics: only fields present in the patch overwrite; everything
// else keeps its prior value. Serialization skips absent fields so the wire
// body carries exactly what the caller set.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpportunityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactStoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_names_round_trip_exactly() {
        let json = serde_json::to_string(&Icon::GraduationCap).unwrap();
        assert_eq!(json, "\"GraduationCap\"");
        let icon: Icon = serde_json::from_str("\"TrendingUp\"").unwrap();
        assert_eq!(icon, Icon::TrendingUp);
    }

    #[test]
    fn unknown_icon_is_rejected() {
        let result: Result<Icon, _> = serde_json::from_str("\"Sparkles\"");
        assert!(result.is_err());
    }

    #[test]
    fn color_and_priority_use_lowercase_names() {
        assert_eq!(serde_json::to_string(&Color::Accent).unwrap(), "\"accent\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(p, Priority::Medium);
    }

    #[test]
    fn form_type_names_match_the_wire_format() {
        assert_eq!(FormType::Newsletter.as_str(), "newsletter");
        assert_eq!(
            serde_json::to_string(&FormType::Leadership).unwrap(),
            "\"leadership\""
        );
        assert!(FormType::Chapter.is_program_application());
        assert!(!FormType::Contact.is_program_application());
    }

    #[test]
    fn event_serializes_with_camel_case_keys() {
        let event = Event {
            id: "1".into(),
            title: "Cleanup".into(),
            date: "2026-04-01".into(),
            time: None,
            location: "Park".into(),
            description: None,
            registration_link: Some("#".into()),
            image: None,
            active: true,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["registrationLink"], "#");
        assert!(value.get("time").is_none());
    }

    #[test]
    fn skills_csv_is_trimmed_and_filtered() {
        let skills = skills_from_csv(" Leadership, Event Planning ,, Communication,");
        assert_eq!(skills, vec!["Leadership", "Event Planning", "Communication"]);
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = ProgramPatch {
            title: Some("New title".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["title"], "New title");
    }

    #[test]
    fn upcoming_events_filters_inactive_and_sorts_ascending() {
        let mut all = crate::seed::default_content();
        all.events.push(Event {
            id: "2".into(),
            title: "Earlier".into(),
            date: "2026-01-01".into(),
            time: None,
            location: "Provo".into(),
            description: None,
            registration_link: None,
            image: None,
            active: true,
        });
        all.events.push(Event {
            id: "3".into(),
            title: "Hidden".into(),
            date: "2026-02-01".into(),
            time: None,
            location: "Ogden".into(),
            description: None,
            registration_link: None,
            image: None,
            active: false,
        });
        let upcoming = all.upcoming_events();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].title, "Earlier");
        assert_eq!(upcoming[1].date, "2026-03-15");
    }
}
