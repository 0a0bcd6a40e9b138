//! Mock marketplace data loaded into the store at startup.

use time::macros::datetime;

use crate::domain::entities::{AuthorRef, CommentRecord, JobDetails, PostRecord, UserRecord};
use crate::domain::types::Urgency;

pub fn users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: "1".to_string(),
            name: "Mette Hansen".to_string(),
            email: "mette@privatrengoring.dk".to_string(),
            avatar: Some("https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?w=150".to_string()),
            location: "København".to_string(),
            rating: 4.9,
            is_pro: true,
            verified: true,
            member_since: datetime!(2023-02-14 09:00 UTC),
        },
        UserRecord {
            id: "2".to_string(),
            name: "Lars Nielsen".to_string(),
            email: "lars@privatrengoring.dk".to_string(),
            avatar: Some("https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?w=150".to_string()),
            location: "Aarhus".to_string(),
            rating: 4.6,
            is_pro: false,
            verified: true,
            member_since: datetime!(2023-06-01 12:30 UTC),
        },
        UserRecord {
            id: "3".to_string(),
            name: "Sofie Jensen".to_string(),
            email: "sofie@privatrengoring.dk".to_string(),
            avatar: Some("https://images.pexels.com/photos/415829/pexels-photo-415829.jpeg?w=150".to_string()),
            location: "Odense".to_string(),
            rating: 4.8,
            is_pro: true,
            verified: false,
            member_since: datetime!(2023-09-20 16:45 UTC),
        },
        UserRecord {
            id: "4".to_string(),
            name: "Anders Pedersen".to_string(),
            email: "anders@privatrengoring.dk".to_string(),
            avatar: None,
            location: "Aalborg".to_string(),
            rating: 4.2,
            is_pro: false,
            verified: false,
            member_since: datetime!(2024-01-08 08:15 UTC),
        },
    ]
}

pub fn posts() -> Vec<PostRecord> {
    let users = users();
    let author = |index: usize| -> AuthorRef { users[index].author_ref() };

    vec![
        PostRecord {
            id: "1".to_string(),
            content: "Søger erfaren rengøringshjælp til en 120 m² lejlighed på Østerbro hver anden uge. Vi har to katte, så ingen allergi tak!".to_string(),
            author: author(1),
            created_at: datetime!(2024-03-18 08:30 UTC),
            likes: 12,
            shares: 2,
            boosted: false,
            job: Some(JobDetails {
                budget: 450,
                urgency: Urgency::Medium,
                job_type: "Fast rengøring".to_string(),
                location: Some("København Ø".to_string()),
            }),
            comments: vec![CommentRecord {
                id: "c1".to_string(),
                author: author(0),
                text: "Jeg har ledige tider om torsdagen. Sender en besked!".to_string(),
                created_at: datetime!(2024-03-18 09:05 UTC),
            }],
        },
        PostRecord {
            id: "2".to_string(),
            content: "Mit bedste tip til kalk på badeværelset: eddike og lidt tålmodighed. Hvad er jeres favorit-tricks?".to_string(),
            author: author(0),
            created_at: datetime!(2024-03-17 14:10 UTC),
            likes: 34,
            shares: 5,
            boosted: true,
            job: None,
            comments: vec![
                CommentRecord {
                    id: "c2".to_string(),
                    author: author(2),
                    text: "Citronsyre virker også rigtig godt!".to_string(),
                    created_at: datetime!(2024-03-17 15:00 UTC),
                },
                CommentRecord {
                    id: "c3".to_string(),
                    author: author(3),
                    text: "Tak for tippet 👍".to_string(),
                    created_at: datetime!(2024-03-17 18:22 UTC),
                },
            ],
        },
        PostRecord {
            id: "3".to_string(),
            content: "Akut: Flytterengøring af rækkehus i Odense inden fredag. Skal kunne godkendes af udlejer.".to_string(),
            author: author(2),
            created_at: datetime!(2024-03-16 19:45 UTC),
            likes: 7,
            shares: 1,
            boosted: false,
            job: Some(JobDetails {
                budget: 3200,
                urgency: Urgency::High,
                job_type: "Flytterengøring".to_string(),
                location: Some("Odense".to_string()),
            }),
            comments: Vec::new(),
        },
    ]
}
