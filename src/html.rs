//! Assembly of the introduction page markup.
//!
//! The template is fixed: document shell with header/footer include
//! placeholders, and a `<main>` section whose content is indented six
//! spaces. Every profile-supplied string is escaped here; downstream
//! formatting assumes already-safe markup.

use crate::profile::Profile;

/// Render the complete introduction page for `profile`.
pub fn render(profile: &Profile) -> String {
    let divider = escape(&profile.divider);
    let mascot = format!(
        "{} {}",
        escape(&profile.mascot.adjective),
        escape(&profile.mascot.animal)
    );
    let mascot = mascot.trim();

    let mut main = String::new();
    main.push_str(&format!("      <h2>Introduction {divider} {mascot}</h2>\n"));

    // Figure with the profile picture; the img attributes are pre-broken
    // one per line.
    main.push_str("      <figure>\n");
    main.push_str("        <img\n");
    main.push_str(&format!(
        "          src=\"{}\"\n",
        escape(&profile.picture.source)
    ));
    main.push_str(&format!(
        "          alt=\"{}\"\n",
        escape(&profile.picture.caption)
    ));
    main.push_str("          width=\"200\"\n");
    main.push_str("        />\n");
    main.push_str("        <figcaption>\n");
    main.push_str(&format!(
        "          <em>{}</em>\n",
        escape(&profile.picture.caption)
    ));
    main.push_str("        </figcaption>\n");
    main.push_str("      </figure>\n");

    for paragraph in &profile.paragraphs {
        main.push_str("      <p class=\"paragraph\">\n");
        main.push_str(&format!("        {}\n", escape(paragraph)));
        main.push_str("      </p>\n");
    }

    if !profile.bullets.is_empty() {
        main.push_str("      <ul>\n");
        for bullet in &profile.bullets {
            main.push_str(&format!("        <li>{}</li>\n", escape(bullet)));
        }
        main.push_str("      </ul>\n");
    }

    if !profile.courses.is_empty() {
        main.push_str("      <h3>Current Courses</h3>\n");
        main.push_str("      <ul>\n");
        for course in &profile.courses {
            main.push_str(&format!(
                "        <li>{}</li>\n",
                escape(&course.summary(&profile.divider))
            ));
        }
        main.push_str("      </ul>\n");
    }

    if let Some(quote) = profile.quote.as_ref().filter(|quote| !quote.text.is_empty()) {
        main.push_str("      <blockquote>\n");
        main.push_str(&format!("        <p>{}</p>\n", escape(&quote.text)));
        if !quote.author.is_empty() {
            main.push_str(&format!(
                "        <cite>— {}</cite>\n",
                escape(&quote.author)
            ));
        }
        main.push_str("      </blockquote>\n");
    }

    if !profile.links.is_empty() {
        main.push_str("      <h3>Links</h3>\n");
        main.push_str("      <ul>\n");
        for link in &profile.links {
            main.push_str(&format!(
                "        <li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>\n",
                escape(&link.url),
                escape(&link.text)
            ));
        }
        main.push_str("      </ul>\n");
    }

    let ack = &profile.acknowledgment;
    main.push_str(&format!(
        "      <p class=\"paragraph ackSstatement\">{} <span style=\"text-decoration: underline;\">{} {}</span></p>\n",
        escape(&ack.statement),
        escape(&ack.formatted_date()),
        escape(&ack.resolved_initials(&profile.name))
    ));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Introduction</title>
    <link rel="stylesheet" href="styles/default.css" />
  </head>
  <body>
    <header>
      <div data-include="components/header.html"></div>
    </header>
    <main>
{main}    </main>

    <footer>
      <div data-include="components/footer.html"></div>
    </footer>
    <script src="scripts/HTMLInclude.min.js"></script>
  </body>
</html>"#
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
