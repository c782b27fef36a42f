use maud::{html, Markup, PreEscaped, DOCTYPE};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

// Draws every `.chart[data-figure]` on the page.
const RENDER_CHARTS_JS: &str = r#"
document.querySelectorAll('.chart[data-figure]').forEach(function (el) {
  var fig = JSON.parse(el.dataset.figure);
  Plotly.newPlot(el, fig.data, fig.layout, { responsive: true, displaylogo: false });
});
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Home,
    Overview,
    Explore,
}

impl NavPage {
    const ALL: [NavPage; 3] = [NavPage::Home, NavPage::Overview, NavPage::Explore];

    fn label(&self) -> &'static str {
        match self {
            NavPage::Home => "Home",
            NavPage::Overview => "Overview",
            NavPage::Explore => "Explore",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            NavPage::Home => "/",
            NavPage::Overview => "/overview",
            NavPage::Explore => "/explore",
        }
    }
}

pub fn desktop_layout(
    title: &str,
    active: NavPage,
    sidebar: Option<Markup>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Airbnb Data Visualization" }
                link rel="stylesheet" href="/static/main.css";
                script src=(PLOTLY_CDN) defer {}
            }
            body {
                header class="topbar" {
                    h3 { "Airbnb Data Visualization" }
                    nav {
                        ul {
                            @for page in NavPage::ALL {
                                li {
                                    a href=(page.href()) class=[(page == active).then_some("active")] {
                                        (page.label())
                                    }
                                }
                            }
                        }
                    }
                }
                div class="dashboard" {
                    @if let Some(sidebar) = sidebar {
                        aside class="sidebar" { (sidebar) }
                    }
                    main class="container" { (content) }
                }
                script { (PreEscaped(format!(
                    "window.addEventListener('load', function () {{ {RENDER_CHARTS_JS} }});"
                ))) }
            }
        }
    }
}
