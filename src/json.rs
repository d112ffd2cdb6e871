//! Flat JSON rendition of a profile.

use crate::profile::Profile;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntroductionDoc<'a> {
    first_name: &'a str,
    preferred_name: &'a str,
    middle_initial: String,
    last_name: &'a str,
    divider: &'a str,
    mascot_adjective: &'a str,
    mascot_animal: &'a str,
    image: &'a str,
    image_caption: &'a str,
    personal_statement: String,
    personal_background: &'a str,
    professional_background: &'a str,
    academic_background: &'a str,
    subject_background: &'a str,
    primary_computer: &'a str,
    courses: Vec<CourseDoc<'a>>,
    links: Vec<LinkDoc<'a>>,
}

#[derive(Debug, Serialize)]
struct CourseDoc<'a> {
    department: &'a str,
    number: &'a str,
    name: &'a str,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
struct LinkDoc<'a> {
    name: &'a str,
    href: &'a str,
}

/// Serialize `profile` as a pretty-printed (two-space indented) JSON
/// document. Background fields map from bullets one, three, two, four and
/// five; missing bullets serialize as empty strings.
pub fn render(profile: &Profile) -> serde_json::Result<String> {
    let doc = IntroductionDoc {
        first_name: &profile.name.first,
        preferred_name: &profile.name.preferred,
        middle_initial: profile.name.middle_initial(),
        last_name: &profile.name.last,
        divider: &profile.divider,
        mascot_adjective: &profile.mascot.adjective,
        mascot_animal: &profile.mascot.animal,
        image: &profile.picture.source,
        image_caption: &profile.picture.caption,
        personal_statement: profile.personal_statement(),
        personal_background: profile.bullet(0),
        professional_background: profile.bullet(2),
        academic_background: profile.bullet(1),
        subject_background: profile.bullet(3),
        primary_computer: profile.bullet(4),
        courses: profile
            .courses
            .iter()
            .map(|course| CourseDoc {
                department: &course.department,
                number: &course.number,
                name: &course.name,
                reason: &course.reason,
            })
            .collect(),
        links: profile
            .links
            .iter()
            .map(|link| LinkDoc {
                name: &link.text,
                href: &link.url,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&doc)
}
