// templates/pages/home.rs

use crate::templates::{card, desktop_layout, NavPage};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        NavPage::Home,
        None,
        html! {
            h1 { "Airbnb Data Visualization" }

            (card("Domain", html! {
                p { "Travel Industry, Property Management and Tourism" }
            }))

            (card("Technologies used", html! {
                p { "Rust, SQLite document store, Plotly, server-rendered HTML" }
            }))

            (card("Overview", html! {
                p {
                    "Analyze Airbnb listing data: clean and prepare the records, then explore "
                    "interactive charts on pricing variations, availability patterns and "
                    "location-based trends."
                }
                ul {
                    li { a href=(NavPage::Overview.href()) { "Overview" } ": listing counts by type, host, room and country" }
                    li { a href=(NavPage::Explore.href()) { "Explore" } ": price and availability analysis" }
                }
            }))
        },
    )
}
