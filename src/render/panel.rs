//! Panel document
//!
//! Static HTML with three tabs. Every interpolated value is escaped for the
//! text context; output is a pure function of its inputs.

use html_escape::encode_text;

/// Panel document title
pub const PANEL_TITLE: &str = "YouChat";

/// Which command produced the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelLayout {
    /// Rewritten code; the response tab has blank lines removed
    Refactor,
    /// Explanation; the first tab is labelled with the language
    Explain { language: String },
}

/// Text shown in the three tabs, unescaped
#[derive(Debug, Clone, Copy)]
pub struct PanelContent<'a> {
    pub message: &'a str,
    pub code: &'a str,
    pub selected_text: &'a str,
}

struct Tab<'a> {
    id: &'static str,
    label: String,
    body: &'a str,
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>YouChat</title>
<link href="https://fonts.googleapis.com/css?family=Roboto:100,300,400,500" rel="stylesheet">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/meyer-reset/2.0/reset.min.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/9.12.0/styles/dracula.min.css">
<style>
body, html { width: 100%; height: 100%; font-family: "Roboto", sans-serif; }
* { box-sizing: border-box; }
.Container { word-break: break-all; border-bottom-right-radius: 6px; border-bottom-left-radius: 6px; position: relative; background: #282B36; box-shadow: 0 10px 40px 0 rgba(40, 43, 54, 0.3); }
.Container nav { top: 15px; left: 15px; position: absolute; }
.Container nav a { z-index: 2; color: #A5AAAF; font-size: 13px; padding: 5px 8px; border-radius: 4px; display: inline-block; text-decoration: none; }
.Container nav a:hover, .Container nav a.active { color: white; }
.Container nav .current { top: 0; left: 0; z-index: 0; width: 40px; height: 22px; border-radius: 3px; position: absolute; background-color: rgba(255, 255, 255, 0.2); }
.Container .Contents { width: 100%; display: flex; overflow: hidden; align-items: flex-start; }
.Container .Content { word-break: break-all; white-space: pre-wrap; width: 100%; flex-shrink: 0; color: #FFFFFF; font-size: 15px; line-height: 24px; padding: 60px 30px 30px 30px; }
.Container .Content .hljs { word-break: break-all; padding: 0; font-size: 13px; line-height: 24px; font-family: Consolas, Monaco, monospace; }
.hljs-number { color: #FFC24C; }
</style>
</head>
<body>
<div class="Container">
"#;

const SCRIPT: &str = r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/9.12.0/highlight.min.js"></script>
<script>
hljs.initHighlightingOnLoad();
const scrollView = document.querySelector('.Container .Contents');
const tabs = document.querySelectorAll('.Container .Contents .Content');
const nav = document.querySelectorAll('.Container nav a');
const currentNav = document.querySelector('.Container nav .current');
let currentTab = 0;
currentNav.style.width = `${nav[currentTab].clientWidth}px`;
scrollView.style.height = `${tabs[currentTab].clientHeight}px`;
const easeInOutCubic = (t, b, c, d) => {
  if ((t /= d / 2) < 1) return c / 2 * t * t * t + b;
  return c / 2 * ((t -= 2) * t * t + 2) + b;
};
const animateToTab = index => {
  const el = tabs[index];
  const scrollStart = scrollView.scrollLeft;
  const startHeight = scrollView.clientHeight;
  nav[currentTab].classList.remove('active');
  nav[index].classList.add('active');
  const time = { start: performance.now(), duration: 700 };
  const tick = now => {
    time.elapsed = now - time.start;
    const ease = (from, to) => easeInOutCubic(time.elapsed, from, to - from, time.duration);
    currentNav.style.transform = `translateX(${ease(nav[currentTab].offsetLeft, nav[index].offsetLeft)}px)`;
    currentNav.style.width = `${ease(nav[currentTab].clientWidth, nav[index].clientWidth)}px`;
    tabs[currentTab].style.opacity = ease(1, 0);
    tabs[index].style.opacity = ease(0, 1);
    scrollView.scrollLeft = ease(scrollStart, el.offsetLeft);
    scrollView.style.height = `${ease(startHeight, el.clientHeight)}px`;
    if (time.elapsed < time.duration) {
      requestAnimationFrame(tick);
    } else {
      currentTab = index;
    }
  };
  requestAnimationFrame(tick);
};
nav.forEach(link => {
  link.addEventListener('click', e => {
    e.preventDefault();
    const index = Array.prototype.indexOf.call(nav, e.target);
    if (currentTab === index) return;
    animateToTab(index);
  });
});
</script>
</body>
</html>
"#;

/// Render the panel document
pub fn render_panel(layout: &PanelLayout, content: PanelContent<'_>) -> String {
    let tabs = [
        Tab {
            id: "response",
            label: match layout {
                PanelLayout::Refactor => "Response".to_string(),
                PanelLayout::Explain { language } => format!("{} explained", language),
            },
            body: content.message,
        },
        Tab {
            id: "code",
            label: "Code only".to_string(),
            body: content.code,
        },
        Tab {
            id: "input",
            label: "Input code".to_string(),
            body: content.selected_text,
        },
    ];

    let mut html = String::with_capacity(
        HEAD.len() + SCRIPT.len() + content.message.len() + content.code.len() + content.selected_text.len() + 512,
    );
    html.push_str(HEAD);

    html.push_str("<nav>\n<div class=\"current\"></div>\n");
    for (i, tab) in tabs.iter().enumerate() {
        let class = if i == 0 { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"#{}\"{}>{}</a>\n",
            tab.id,
            class,
            encode_text(&tab.label)
        ));
    }
    html.push_str("</nav>\n<div class=\"Contents\">\n");

    for tab in &tabs {
        html.push_str(&format!(
            "<div class=\"Content\" id=\"{}\"><pre><code>{}</code></pre></div>\n",
            tab.id,
            encode_text(tab.body)
        ));
    }
    html.push_str("</div>\n</div>\n");
    html.push_str(SCRIPT);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content<'a>(message: &'a str, code: &'a str, selected: &'a str) -> PanelContent<'a> {
        PanelContent {
            message,
            code,
            selected_text: selected,
        }
    }

    #[test]
    fn test_code_lands_in_code_tab() {
        let html = render_panel(&PanelLayout::Refactor, content("msg", "print(1)", "sel"));
        assert!(html.contains("<div class=\"Content\" id=\"code\"><pre><code>print(1)</code></pre></div>"));
        assert!(html.contains("id=\"input\"><pre><code>sel</code>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render_panel(
            &PanelLayout::Refactor,
            content("</script><script>alert(1)</script>", "a < b && c", "<b>x</b>"),
        );
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;/script&gt;&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("a &lt; b &amp;&amp; c"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn test_explain_label_uses_language() {
        let layout = PanelLayout::Explain {
            language: "rust".to_string(),
        };
        let html = render_panel(&layout, content("m", "", "s"));
        assert!(html.contains(">rust explained</a>"));
        assert!(html.contains("id=\"code\"><pre><code></code>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let c = content("m\n```x```", "x", "s");
        assert_eq!(
            render_panel(&PanelLayout::Refactor, c),
            render_panel(&PanelLayout::Refactor, c)
        );
    }
}
