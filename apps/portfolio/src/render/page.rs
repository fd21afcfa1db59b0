//! Page assembly: header, hero, about, skills, experience, projects, contact, footer.
//!
//! AI panels are plain HTML forms posting to `/features/*`, so the page works
//! without JavaScript. The inline script only adds the presentational bits:
//! header styling on scroll, the mobile menu, reveal-on-scroll and clipboard.

use std::collections::HashSet;

use crate::features::board::{BoardSnapshot, Feature, FeatureSnapshot};
use crate::llm_client::CompletionOutcome;
use crate::models::profile::{Icon, Profile};
use crate::visibility::DEFAULT_THRESHOLD;

use super::escape_html;
use super::markdown::to_markup;

/// Seconds between reloads while any feature is waiting on the API.
const PENDING_REFRESH_SECS: u32 = 2;

const STYLE: &str = r#"
html { scroll-behavior: smooth; }
* { box-sizing: border-box; }
body { margin: 0; font-family: 'Inter', sans-serif; background: #000; color: #fff; -webkit-font-smoothing: antialiased; }
a { color: inherit; text-decoration: none; }
.backdrop { position: fixed; inset: 0; z-index: -1; background: radial-gradient(ellipse 80% 80% at 50% -20%, rgba(120,119,198,0.15), rgba(255,255,255,0)); }
.site-header { position: fixed; top: 0; left: 0; width: 100%; z-index: 50; transition: all .3s; }
.site-header.scrolled { background: rgba(0,0,0,.8); backdrop-filter: blur(16px); border-bottom: 1px solid #1f2937; }
.nav { max-width: 80rem; margin: 0 auto; padding: 1rem 1.5rem; display: flex; justify-content: space-between; align-items: center; }
.brand { font-family: monospace; font-size: 1.5rem; font-weight: 700; }
.brand:hover, .nav-links a:hover, .social a:hover { color: #22d3ee; }
.nav-links { display: flex; gap: 1.5rem; align-items: center; color: #d1d5db; }
.menu-toggle { display: none; background: none; border: 0; color: #fff; font-size: 1.5rem; }
.mobile-menu { display: none; flex-direction: column; align-items: center; gap: 1rem; padding: 1rem; background: rgba(0,0,0,.9); }
.mobile-menu.open { display: flex; }
@media (max-width: 768px) { .nav-links { display: none; } .menu-toggle { display: block; } }
.hero { min-height: 100vh; display: flex; align-items: center; max-width: 80rem; margin: 0 auto; padding: 0 1.5rem; }
.hero .kicker { color: #22d3ee; font-family: monospace; font-size: 1.125rem; }
.hero h1 { font-size: clamp(3rem, 8vw, 6rem); font-weight: 900; letter-spacing: -0.05em; margin: 0 0 1rem; }
.hero h2 { font-size: clamp(2.25rem, 6vw, 4.5rem); font-weight: 700; color: #9ca3af; margin: 0 0 2rem; }
.hero p { color: #9ca3af; max-width: 36rem; font-weight: 300; font-size: 1.125rem; margin-bottom: 3rem; }
.fade-in { animation: fade-in-down .8s ease-out forwards; opacity: 0; }
@keyframes fade-in-down { 0% { opacity: 0; transform: translateY(-20px); } 100% { opacity: 1; transform: translateY(0); } }
.section { width: 100%; max-width: 72rem; margin: 0 auto; padding: 6rem 1.5rem; transition: all 1s; }
.reveal.concealed { opacity: 0; transform: translateY(2.5rem); }
.reveal.revealed { opacity: 1; transform: none; }
.section h2 { font-size: 1.875rem; font-weight: 700; margin-bottom: 3rem; }
.section h2 .num { color: #22d3ee; font-family: monospace; margin-right: .75rem; font-size: 1.5rem; }
.glass-card { background: rgba(15,23,42,.5); backdrop-filter: blur(16px) saturate(180%); border: 1px solid rgba(255,255,255,.1); border-radius: 1.5rem; padding: 2rem; transition: border-color .3s, box-shadow .3s, transform .3s; }
.glass-card:hover { transform: translateY(-5px); border-color: rgba(0,255,255,.4); box-shadow: 0 0 25px rgba(0,255,255,.1); }
.muted { color: #9ca3af; font-weight: 300; }
.about-grid { display: grid; grid-template-columns: 3fr 2fr; gap: 4rem; align-items: center; }
@media (max-width: 768px) { .about-grid { grid-template-columns: 1fr; } }
.photo { width: 100%; max-width: 20rem; border-radius: .5rem; display: block; margin: 0 auto; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(15rem, 1fr)); gap: 1.5rem; }
.skill { text-align: center; }
.icon { color: #22d3ee; font-size: 1.75rem; }
.tags { display: flex; flex-wrap: wrap; gap: .5rem; margin-bottom: 1.5rem; }
.tag { color: #67e8f9; font-size: .75rem; font-family: monospace; background: rgba(22,78,99,.5); padding: .25rem .75rem; border-radius: 9999px; }
.project { display: flex; flex-direction: column; }
.project .grow { flex-grow: 1; }
.btn { display: inline-flex; align-items: center; justify-content: center; gap: .5rem; font: inherit; font-size: .875rem; cursor: pointer; border-radius: .5rem; padding: .5rem 1rem; }
.btn-outline { color: #67e8f9; background: transparent; border: 1px solid rgba(34,211,238,.3); }
.btn-outline:hover { background: rgba(34,211,238,.1); }
.btn-solid { color: #000; background: #06b6d4; border: 0; font-weight: 600; padding: .75rem 2rem; }
.btn:disabled { opacity: .5; cursor: not-allowed; }
.modal { position: fixed; inset: 0; z-index: 60; display: flex; align-items: center; justify-content: center; padding: 1rem; background: rgba(0,0,0,.7); backdrop-filter: blur(12px); }
.modal-card { background: #0f172a; border: 1px solid rgba(34,211,238,.2); border-radius: 1rem; padding: 2rem; max-width: 42rem; width: 100%; }
.modal-head { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
.modal-head h3 { margin: 0; color: #22d3ee; }
.modal-head h3.error, .error { color: #f87171; }
.modal-body { max-height: 70vh; overflow-y: auto; color: #d1d5db; }
.modal-body strong { color: #f9fafb; }
.close { background: none; border: 0; color: #9ca3af; font-size: 1.5rem; cursor: pointer; }
.spinner { width: 2rem; height: 2rem; border: 3px solid rgba(34,211,238,.3); border-top-color: #22d3ee; border-radius: 50%; animation: spin 1s linear infinite; margin: 2rem auto; }
@keyframes spin { to { transform: rotate(360deg); } }
.draft-form { display: flex; gap: 1rem; margin-bottom: 1rem; }
.draft-form input { flex-grow: 1; background: #1e293b; border: 1px solid #374151; border-radius: .5rem; padding: .5rem 1rem; color: #fff; font: inherit; }
.draft { position: relative; margin-top: 1.5rem; text-align: left; }
.draft textarea { width: 100%; height: 12rem; background: #0f172a; border: 1px solid #374151; border-radius: .5rem; padding: 1rem; color: #d1d5db; font-family: monospace; font-size: .875rem; }
.draft .copy { position: absolute; top: .5rem; right: .5rem; }
.center { text-align: center; }
footer { padding: 1.5rem 0; border-top: 1px solid #1f2937; color: #6b7280; }
.footer-row { max-width: 80rem; margin: 1.5rem auto 0; padding: 0 1.5rem; display: flex; justify-content: space-between; align-items: center; font-family: monospace; font-size: .875rem; }
.status-btn { background: none; border: 0; color: #9ca3af; font: inherit; font-size: .875rem; cursor: pointer; margin: 0 auto; display: flex; gap: .5rem; }
.status-muted { color: #6b7280; } .status-warn { color: #facc15; } .status-ok { color: #4ade80; } .status-error { color: #f87171; }
.social { display: flex; gap: 1.5rem; color: #9ca3af; }
"#;

const SCRIPT: &str = r#"
(function () {
  var header = document.querySelector('.site-header');
  var onScroll = function () { header.classList.toggle('scrolled', window.scrollY > 20); };
  window.addEventListener('scroll', onScroll); onScroll();

  var menu = document.querySelector('.mobile-menu');
  var toggle = document.querySelector('.menu-toggle');
  toggle.addEventListener('click', function () { menu.classList.toggle('open'); });
  menu.querySelectorAll('a').forEach(function (a) {
    a.addEventListener('click', function () { menu.classList.remove('open'); });
  });

  document.querySelectorAll('[data-reveal-threshold]').forEach(function (el) {
    var threshold = parseFloat(el.dataset.revealThreshold);
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (entry.isIntersecting) {
          el.classList.replace('concealed', 'revealed');
          observer.disconnect();
          fetch('/api/v1/reveal/' + el.id, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ intersection_ratio: entry.intersectionRatio, is_intersecting: true })
          }).catch(function () {});
        }
      });
    }, { threshold: threshold });
    observer.observe(el);
  });

  document.querySelectorAll('[data-copy-target]').forEach(function (btn) {
    btn.addEventListener('click', function () {
      var text = document.getElementById(btn.dataset.copyTarget).value;
      var done = function () {
        btn.textContent = 'Copied!';
        setTimeout(function () { btn.textContent = 'Copy'; }, 2000);
      };
      if (navigator.clipboard) { navigator.clipboard.writeText(text).then(done, done); } else { done(); }
    });
  });

  var topic = document.querySelector('input[name="topic"]');
  if (topic) {
    var submit = topic.form.querySelector('button[type="submit"]');
    var sync = function () { if (!submit.dataset.pending) submit.disabled = topic.value.trim() === ''; };
    topic.addEventListener('input', sync); sync();
  }
})();
"#;

/// Ids of the sections that reveal on scroll, in page order.
pub const REVEAL_SECTIONS: [&str; 5] = ["about", "skills", "experience", "projects", "contact"];

/// Renders the full page for the given board state. `revealed` lists sections
/// the visitor has already scrolled past; `year` feeds the footer.
pub fn render_page(
    profile: &Profile,
    board: &BoardSnapshot,
    revealed: &HashSet<String>,
    year: i32,
) -> String {
    let any_pending = Feature::ALL.iter().any(|f| board.get(*f).is_pending());
    let refresh = if any_pending {
        format!(r#"<meta http-equiv="refresh" content="{PENDING_REFRESH_SECS}">"#)
    } else {
        String::new()
    };

    let mut body = String::new();
    body.push_str(&header(profile));
    body.push_str("<main>");
    body.push_str(&hero(profile));
    let surfaces = [
        ("about", "", about(profile, &board.career_coach)),
        ("skills", "", skills(profile)),
        ("experience", "", experience(profile)),
        ("projects", "", projects(profile, &board.project_insights)),
        ("contact", "center", contact(profile, &board.message_draft)),
    ];
    for (id, extra_class, content) in &surfaces {
        body.push_str(&section(id, extra_class, content, revealed.contains(*id)));
    }
    body.push_str("</main>");
    body.push_str(&footer(profile, board, year));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{name} | AI/ML Engineer</title>
<link rel="preconnect" href="https://fonts.googleapis.com">
<link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;700;900&display=swap" rel="stylesheet">
<style>{STYLE}</style>
<noscript><style>.reveal.concealed {{ opacity: 1; transform: none; }}</style></noscript>
</head>
<body>
<div class="backdrop"></div>
{body}
<script>{SCRIPT}</script>
</body>
</html>"#,
        name = escape_html(profile.name),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Surfaces
// ────────────────────────────────────────────────────────────────────────────

fn header(profile: &Profile) -> String {
    let links: String = profile
        .nav
        .iter()
        .map(|l| format!(r#"<a href="{}">{}</a>"#, l.href, escape_html(l.label)))
        .collect();

    format!(
        r##"<header class="site-header">
<nav class="nav">
<a href="#home" class="brand">{initials}</a>
<div class="nav-links">{links}<span>|</span>{social}</div>
<button class="menu-toggle" type="button" aria-label="Toggle menu">&#9776;</button>
</nav>
<div class="mobile-menu">{links}</div>
</header>"##,
        initials = escape_html(profile.initials),
        social = social_links(profile),
    )
}

fn hero(profile: &Profile) -> String {
    format!(
        r##"<section id="home" class="hero"><div>
<p class="kicker fade-in" style="animation-delay:.2s">Hi, my name is</p>
<h1 class="fade-in">{name}.</h1>
<h2 class="fade-in" style="animation-delay:.4s">{tagline}</h2>
<p class="fade-in" style="animation-delay:.6s">{summary}</p>
<a href="#contact" class="btn btn-solid fade-in" style="animation-delay:.8s">Get In Touch &#8599;</a>
</div></section>"##,
        name = escape_html(profile.name),
        tagline = escape_html(profile.tagline),
        summary = escape_html(profile.summary),
    )
}

fn about(profile: &Profile, coach: &FeatureSnapshot) -> String {
    let paragraphs: String = profile
        .about
        .iter()
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect();

    let body = format!(
        r#"<div class="about-grid">
<div>
<h2><span class="num">01.</span>About Me</h2>
<div class="glass-card muted">{paragraphs}
<form method="post" action="/features/career-coach">
<button type="submit" class="btn btn-outline"{disabled}>&#10024; Ask AI Career Coach</button>
</form>
</div>
</div>
<div><img class="photo" src="{photo}" alt="{name}" onerror="this.onerror=null;this.src='{fallback}';"></div>
</div>{modal}"#,
        disabled = disabled_attr(coach.is_pending()),
        photo = escape_html(profile.photo_path),
        fallback = escape_html(profile.photo_fallback),
        name = escape_html(profile.name),
        modal = result_modal(coach, "AI Career Coach", "/features/career-coach/dismiss"),
    );

    body
}

fn skills(profile: &Profile) -> String {
    let cards: String = profile
        .skills
        .iter()
        .map(|s| {
            format!(
                r#"<div class="glass-card skill"><div class="icon">{}</div><h3>{}</h3></div>"#,
                icon_glyph(s.icon),
                escape_html(s.name)
            )
        })
        .collect();

    let body = format!(
        r#"<h2 class="center"><span class="num">02.</span>My Tech Stack</h2><div class="grid">{cards}</div>"#
    );
    body
}

fn experience(profile: &Profile) -> String {
    let jobs: String = profile
        .experience
        .iter()
        .map(|job| {
            let highlights: String = job
                .highlights
                .iter()
                .map(|h| format!("<li>{}</li>", escape_html(h)))
                .collect();
            format!(
                r#"<div class="glass-card"><h3>{role}</h3><p class="kicker">{company}</p><p class="muted">{period}</p><ul class="muted">{highlights}</ul></div>"#,
                role = escape_html(job.role),
                company = escape_html(job.company),
                period = escape_html(job.period),
            )
        })
        .collect();

    let body = format!(r#"<h2><span class="num">03.</span>Where I've Worked</h2>{jobs}"#);
    body
}

fn projects(profile: &Profile, insights: &FeatureSnapshot) -> String {
    let cards: String = profile
        .projects
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let tags: String = p
                .tags
                .iter()
                .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
                .collect();
            format!(
                r#"<div class="glass-card project">
<div class="modal-head"><span class="icon">{icon}</span><a href="{repo}" target="_blank" rel="noopener noreferrer" aria-label="Source on GitHub">GitHub &#8599;</a></div>
<h3>{title}</h3>
<p class="muted grow">{description}</p>
<div class="tags">{tags}</div>
<form method="post" action="/features/project-insights">
<input type="hidden" name="project" value="{index}">
<button type="submit" class="btn btn-outline"{disabled}>&#10024; Get AI Insights</button>
</form>
</div>"#,
                icon = icon_glyph(p.icon),
                repo = escape_html(p.repo_url),
                title = escape_html(p.title),
                description = escape_html(p.description),
                disabled = disabled_attr(insights.is_pending()),
            )
        })
        .collect();

    let title = match insights.subject.as_deref() {
        Some(subject) => format!("AI Project Insights: {subject}"),
        None => "AI Project Insights".to_string(),
    };

    let body = format!(
        r#"<h2><span class="num">04.</span>Things I've Built</h2><div class="grid">{cards}</div>{modal}"#,
        modal = result_modal(insights, &title, "/features/project-insights/dismiss"),
    );
    body
}

fn contact(profile: &Profile, draft: &FeatureSnapshot) -> String {
    let pending = draft.is_pending();
    let topic = draft.subject.as_deref().unwrap_or_default();

    // Drafts and errors share one read-only text area; only real drafts can be copied.
    let panel = match draft.outcome() {
        Some(outcome) => draft_panel(outcome.display_text(), draft.copyable_text().is_some()),
        None if pending => draft_panel(Feature::MessageDraft.pending_text(), false),
        None => String::new(),
    };

    let button_label = if pending {
        r#"<span class="spinner" style="width:1.25rem;height:1.25rem;margin:0"></span>"#
    } else {
        "Generate Draft"
    };

    let body = format!(
        r#"<h2><span class="num">05.</span>Get In Touch</h2>
<p class="muted">{blurb}</p>
<div class="glass-card">
<h3 class="kicker">AI Message Draft &#10024;</h3>
<p class="muted">Enter a topic and let AI draft a conversation starter for you.</p>
<form method="post" action="/features/message-draft" class="draft-form">
<input type="text" name="topic" value="{topic}" placeholder="e.g., Natural Language Processing" required>
<button type="submit" class="btn btn-solid"{disabled}{pending_marker}>{button_label}</button>
</form>
{panel}
</div>"#,
        blurb = escape_html(profile.contact_blurb),
        topic = escape_html(topic),
        disabled = disabled_attr(pending),
        pending_marker = if pending { r#" data-pending="1""# } else { "" },
    );
    body
}

fn draft_panel(text: &str, copyable: bool) -> String {
    let copy = if copyable {
        r#"<button type="button" class="btn btn-outline copy" data-copy-target="draft-text">Copy</button>"#
    } else {
        ""
    };
    format!(
        r#"<div class="draft"><textarea id="draft-text" readonly>{text}</textarea>{copy}
<form method="post" action="/features/message-draft/dismiss"><button type="submit" class="close" aria-label="Clear draft">&times;</button></form></div>"#,
        text = escape_html(text),
    )
}

fn footer(profile: &Profile, board: &BoardSnapshot, year: i32) -> String {
    let status = board.service_status_summary;
    format!(
        r#"<footer id="footer">
<form method="post" action="/features/service-status">
<button type="submit" class="status-btn"{disabled}>AI Service Status: <span class="status-{tone}">{label}</span></button>
</form>
<div class="footer-row"><p>&copy; {year} {name}</p><div class="social">{social}</div></div>
</footer>"#,
        disabled = disabled_attr(board.service_status.is_pending()),
        tone = status.tone(),
        label = status.label(),
        name = escape_html(profile.name),
        social = social_links(profile),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ────────────────────────────────────────────────────────────────────────────

/// Wraps a surface in a reveal-on-scroll section. Sections the visitor has
/// not revealed yet carry the threshold the page script observes them with.
fn section(id: &str, extra_class: &str, body: &str, revealed: bool) -> String {
    if revealed {
        return format!(r#"<section id="{id}" class="section reveal revealed {extra_class}">{body}</section>"#);
    }
    format!(
        r#"<section id="{id}" class="section reveal concealed {extra_class}" data-reveal-threshold="{DEFAULT_THRESHOLD}">{body}</section>"#
    )
}

/// Modal shown for a non-idle feature: spinner while pending, markup on
/// success, error-styled message on failure.
fn result_modal(snapshot: &FeatureSnapshot, title: &str, dismiss_action: &str) -> String {
    let (heading_class, content) = match snapshot.outcome() {
        Some(CompletionOutcome::Success { text }) => ("", to_markup(text)),
        Some(CompletionOutcome::Failure { message }) => ("error", to_markup(message)),
        None if snapshot.is_pending() => (
            "",
            format!(
                r#"<div class="spinner" role="status"></div><p class="muted center">{}</p>"#,
                snapshot.feature.pending_text()
            ),
        ),
        None => return String::new(),
    };

    format!(
        r#"<div class="modal" role="dialog" aria-modal="true"><div class="modal-card">
<div class="modal-head"><h3 class="{heading_class}">{title}</h3>
<form method="post" action="{dismiss_action}"><button type="submit" class="close" aria-label="Close">&times;</button></form></div>
<div class="modal-body">{content}</div>
</div></div>"#,
        title = escape_html(title),
    )
}

fn social_links(profile: &Profile) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">GitHub</a><a href="{}" target="_blank" rel="noopener noreferrer">LinkedIn</a>"#,
        escape_html(profile.github_url),
        escape_html(profile.linkedin_url),
    )
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Code => "&lt;/&gt;",
        Icon::Cpu => "&#9635;",
        Icon::Layers => "&#9776;",
        Icon::Function => "&#402;",
        Icon::Database => "&#9921;",
        Icon::Wind => "&#8776;",
        Icon::Terminal => "&gt;_",
        Icon::GitBranch => "&#9095;",
        Icon::Bot => "&#129302;",
        Icon::Leaf => "&#127807;",
        Icon::ScanFace => "&#9786;",
        Icon::HeartPulse => "&#9829;",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::board::FeatureBoard;
    use crate::features::controller::RequestState;
    use crate::features::status::ServiceStatus;
    use crate::models::profile::PROFILE;

    fn idle(feature: Feature) -> FeatureSnapshot {
        FeatureSnapshot {
            feature,
            subject: None,
            state: RequestState::Idle,
        }
    }

    fn settled(feature: Feature, subject: Option<&str>, outcome: CompletionOutcome) -> FeatureSnapshot {
        FeatureSnapshot {
            feature,
            subject: subject.map(str::to_string),
            state: RequestState::Settled(outcome),
        }
    }

    fn idle_board() -> BoardSnapshot {
        BoardSnapshot {
            career_coach: idle(Feature::CareerCoach),
            project_insights: idle(Feature::ProjectInsights),
            message_draft: idle(Feature::MessageDraft),
            service_status: idle(Feature::ServiceStatus),
            service_status_summary: ServiceStatus::Unknown,
        }
    }

    #[tokio::test]
    async fn test_fresh_board_renders_every_section_without_modals() {
        let board = FeatureBoard::new().snapshot().await;
        let html = render_page(&PROFILE, &board, &HashSet::new(), 2026);

        for id in ["home", "about", "skills", "experience", "projects", "contact", "footer"] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing section {id}");
        }
        assert!(!html.contains("role=\"dialog\""));
        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("&copy; 2026 Immani Sai"));
        assert!(html.contains("AI Service Status: <span class=\"status-muted\">Unknown</span>"));
    }

    #[test]
    fn test_sections_start_concealed_with_reveal_threshold() {
        let html = render_page(&PROFILE, &idle_board(), &HashSet::new(), 2026);
        assert!(html.contains(
            r#"<section id="skills" class="section reveal concealed " data-reveal-threshold="0.1">"#
        ));
        for id in REVEAL_SECTIONS {
            assert!(html.contains(&format!(r#"<section id="{id}" class="section reveal concealed"#)));
        }
    }

    #[test]
    fn test_revealed_sections_render_without_observation() {
        let revealed: HashSet<String> = ["contact".to_string()].into_iter().collect();
        let html = render_page(&PROFILE, &idle_board(), &revealed, 2026);

        assert!(html.contains(r#"<section id="contact" class="section reveal revealed center">"#));
        assert!(html.contains(r#"<section id="about" class="section reveal concealed ""#));
    }

    #[test]
    fn test_pending_coach_shows_spinner_disables_button_and_refreshes() {
        let mut board = idle_board();
        let mut controller = crate::features::controller::RequestController::new();
        controller.submit(None);
        board.career_coach.state = controller.state().clone();

        let html = render_page(&PROFILE, &board, &HashSet::new(), 2026);
        assert!(html.contains("Analyzing profile..."));
        assert!(html.contains(r#"<button type="submit" class="btn btn-outline" disabled>&#10024; Ask AI Career Coach"#));
        assert!(html.contains(r#"http-equiv="refresh""#));
    }

    #[test]
    fn test_settled_insight_renders_markup_under_project_title() {
        let mut board = idle_board();
        board.project_insights = settled(
            Feature::ProjectInsights,
            Some("AI Study Buddy"),
            CompletionOutcome::Success {
                text: "**Technical Breakdown**\n* Streamlit front end".to_string(),
            },
        );

        let html = render_page(&PROFILE, &board, &HashSet::new(), 2026);
        assert!(html.contains("AI Project Insights: AI Study Buddy"));
        assert!(html.contains("<strong>Technical Breakdown</strong><ul><li>Streamlit front end</li></ul>"));
        assert!(html.contains(r#"action="/features/project-insights/dismiss""#));
    }

    #[test]
    fn test_failure_is_rendered_with_error_styling() {
        let mut board = idle_board();
        board.career_coach = settled(
            Feature::CareerCoach,
            None,
            CompletionOutcome::Failure {
                message: "API key is missing.".to_string(),
            },
        );

        let html = render_page(&PROFILE, &board, &HashSet::new(), 2026);
        assert!(html.contains(r#"<h3 class="error">AI Career Coach</h3>"#));
        assert!(html.contains("API key is missing."));
    }

    #[test]
    fn test_draft_success_is_copyable_and_failure_is_not() {
        let mut board = idle_board();
        board.message_draft = settled(
            Feature::MessageDraft,
            Some("Rust & ML"),
            CompletionOutcome::Success {
                text: "Subject: Connecting to chat about Rust & ML".to_string(),
            },
        );
        let html = render_page(&PROFILE, &board, &HashSet::new(), 2026);
        assert!(html.contains("data-copy-target=\"draft-text\""));
        assert!(html.contains(">Subject: Connecting to chat about Rust &amp; ML</textarea>"));
        assert!(html.contains(r#"value="Rust &amp; ML""#));

        board.message_draft = settled(
            Feature::MessageDraft,
            Some("Rust"),
            CompletionOutcome::Failure {
                message: "No content generated.".to_string(),
            },
        );
        let html = render_page(&PROFILE, &board, &HashSet::new(), 2026);
        assert!(html.contains(">No content generated.</textarea>"));
        assert!(!html.contains("data-copy-target"));
    }

    #[test]
    fn test_every_project_gets_an_insight_form() {
        let html = render_page(&PROFILE, &idle_board(), &HashSet::new(), 2026);
        for index in 0..PROFILE.projects.len() {
            assert!(html.contains(&format!(r#"name="project" value="{index}""#)));
        }
    }
}
