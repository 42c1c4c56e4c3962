//! Canonical seed dataset.
//!
//! This is the single definition of the default site content. The gateway's
//! `initialize` operation seeds absent collections from it, and the client
//! accessors fall back to it when the gateway is unreachable, so the two can
//! never drift apart.

use crate::types::{
    AboutContent, AllContent, Announcement, Color, Event, Icon, ImpactStory, Opportunity,
    Priority, Program, Settings, Stat,
};

/// The default content for every collection and singleton.
pub fn default_content() -> AllContent {
    AllContent {
        programs: default_programs(),
        events: default_events(),
        announcements: default_announcements(),
        opportunities: default_opportunities(),
        stats: default_stats(),
        impact_stories: default_impact_stories(),
        about: default_about(),
        settings: default_settings(),
    }
}

pub fn default_programs() -> Vec<Program> {
    vec![
        Program {
            id: "1".into(),
            title: "Create a UISN Chapter at Your School".into(),
            description: "Start an official UISN chapter on your campus. Access toolkits, \
                          branding, and support to lead service initiatives locally and connect \
                          with other universities in Utah."
                .into(),
            frequency: "Year-round".into(),
            location: "Your Campus".into(),
            impact: "Statewide network".into(),
            icon: Icon::GraduationCap,
            color: Color::Secondary,
            active: true,
            slug: "create-chapter".into(),
        },
        Program {
            id: "2".into(),
            title: "Host a UISN Service Event".into(),
            description: "Evening service-focused events including community projects, donation \
                          drives, and volunteering. Designed for students with busy schedules - \
                          1\u{2013}2 hours, low commitment, high impact."
                .into(),
            frequency: "Flexible".into(),
            location: "Your Community".into(),
            impact: "Quick & impactful".into(),
            icon: Icon::Calendar,
            color: Color::Accent,
            active: true,
            slug: "service-event".into(),
        },
        Program {
            id: "3".into(),
            title: "Join the Utah Intercollegiate Service Network".into(),
            description: "Become part of a statewide student service coalition. Collaborate with \
                          students from other colleges, share resources, events, and impact \
                          reports."
                .into(),
            frequency: "Ongoing".into(),
            location: "Statewide".into(),
            impact: "9+ universities".into(),
            icon: Icon::Heart,
            color: Color::Secondary,
            active: true,
            slug: "join-network".into(),
        },
        Program {
            id: "4".into(),
            title: "Join the UISN Leadership Team".into(),
            description: "Take on a leadership role within UISN and help shape the future of \
                          student service in Utah. Gain valuable experience, earn service hours, \
                          access possible stipends, and expand your network."
                .into(),
            frequency: "Ongoing Commitment".into(),
            location: "Statewide".into(),
            impact: "Leadership & Growth".into(),
            icon: Icon::Users,
            color: Color::Accent,
            active: true,
            slug: "leadership".into(),
        },
    ]
}

pub fn default_events() -> Vec<Event> {
    vec![Event {
        id: "1".into(),
        title: "Spring Kickoff Service Day".into(),
        date: "2026-03-15".into(),
        time: Some("9:00 AM - 3:00 PM".into()),
        location: "Salt Lake City".into(),
        description: Some(
            "Join us for our inaugural service day! Multiple project sites available.".into(),
        ),
        registration_link: Some("#".into()),
        image: None,
        active: true,
    }]
}

pub fn default_announcements() -> Vec<Announcement> {
    vec![Announcement {
        id: "1".into(),
        title: "Welcome to UISN!".into(),
        content: "We are excited to launch the Utah Intercollegiate Service Network in 2026. \
                  Stay tuned for upcoming events and opportunities!"
            .into(),
        date: "2026-01-15".into(),
        priority: Priority::High,
        active: true,
    }]
}

pub fn default_opportunities() -> Vec<Opportunity> {
    vec![Opportunity {
        id: "1".into(),
        title: "Campus Chapter Leaders Needed".into(),
        description: "We are seeking passionate student leaders to start UISN chapters at their \
                      universities."
            .into(),
        category: Some("Leadership".into()),
        commitment: Some("Ongoing".into()),
        skills: vec![
            "Leadership".into(),
            "Event Planning".into(),
            "Communication".into(),
        ],
        active: true,
    }]
}

pub fn default_stats() -> Vec<Stat> {
    vec![
        Stat {
            id: "1".into(),
            label: "Active Volunteers".into(),
            value: "1,000+".into(),
            description: "Students making a difference".into(),
            icon: Icon::Users,
            color: Color::Secondary,
        },
        Stat {
            id: "2".into(),
            label: "Service Hours".into(),
            value: "5,000+".into(),
            description: "Contributed since 2026".into(),
            icon: Icon::Clock,
            color: Color::Accent,
        },
        Stat {
            id: "3".into(),
            label: "Community Partners".into(),
            value: "5".into(),
            description: "Organizations served".into(),
            icon: Icon::Heart,
            color: Color::Secondary,
        },
        Stat {
            id: "4".into(),
            label: "Partner Universities".into(),
            value: "9+".into(),
            description: "Colleges across Utah".into(),
            icon: Icon::TrendingUp,
            color: Color::Accent,
        },
    ]
}

pub fn default_impact_stories() -> Vec<ImpactStory> {
    vec![
        ImpactStory {
            id: "1".into(),
            title: "Building Community Together".into(),
            description: "In our first year, UISN volunteers have contributed over 5,000 hours \
                          of service across Utah communities."
                .into(),
            image: "https://images.unsplash.com/photo-1758599667729-a6f0f8bd213b?w=800&q=80".into(),
            active: true,
        },
        ImpactStory {
            id: "2".into(),
            title: "Growing Network".into(),
            description: "Started at Snow College, we've expanded to partner with 9 universities \
                          across Utah, creating a statewide movement."
                .into(),
            image: "https://images.unsplash.com/photo-1615856210162-9ae33390b1a2?w=800&q=80".into(),
            active: true,
        },
        ImpactStory {
            id: "3".into(),
            title: "Student-Led Impact".into(),
            description: "Over 1,000 student volunteers are actively participating in service \
                          projects, proving that young people can create lasting change."
                .into(),
            image: "https://images.unsplash.com/photo-1582213782179-e0d53f98f2ca?w=800&q=80".into(),
            active: true,
        },
    ]
}

pub fn default_about() -> AboutContent {
    AboutContent {
        mission: "To mobilize and empower college students across Utah to serve their \
                  communities, develop leadership skills, and create lasting positive impact \
                  through coordinated volunteer initiatives that address real community needs."
            .into(),
        story: "Founded in 2026 at Snow College by a passionate group of students who saw the \
                need for coordinated service across Utah's universities. With the support and \
                guidance of UServeUtah, we launched UISN to create a statewide network where \
                college students could collaborate on meaningful service projects. What started \
                as a small group at Snow College has grown into a movement spanning 9+ \
                universities, with over 1,000 active volunteers making a real difference in \
                their communities."
            .into(),
    }
}

pub fn default_settings() -> Settings {
    Settings {
        donate_enabled: false,
        email_notifications: "utahintercollegiateservicenetw@gmail.com".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_four_programs_with_expected_slugs() {
        let programs = default_programs();
        let slugs: Vec<&str> = programs.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["create-chapter", "service-event", "join-network", "leadership"]
        );
        assert!(programs.iter().all(|p| p.active));
    }

    #[test]
    fn seed_collections_have_unique_ids() {
        let content = default_content();
        for records in [
            content.programs.iter().map(|p| &p.id).collect::<Vec<_>>(),
            content.stats.iter().map(|s| &s.id).collect(),
            content.impact_stories.iter().map(|s| &s.id).collect(),
        ] {
            let mut deduped = records.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), records.len());
        }
    }

    #[test]
    fn seed_round_trips_through_json() {
        let content = default_content();
        let json = serde_json::to_string(&content).unwrap();
        let back: AllContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }
}
