use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_wraps_body_under_title() {
        let html = card("Overview", html! { p { "Listing counts" } }).into_string();

        assert!(html.starts_with("<div class=\"card\"><h2>Overview</h2>"));
        assert!(html.contains("<div class=\"card-body\"><p>Listing counts</p></div>"));
    }
}
