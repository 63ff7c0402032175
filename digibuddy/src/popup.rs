//! Popups attached to rendered features.

use serde::{Deserialize, Serialize};

/// Text of the popup action button that routes to the feature.
pub const ROUTE_ACTION_LABEL: &str = "Route to this destination";

/// Property keys shown in feature popups, with their labels.
pub const POPUP_ROWS: [(&str, &str); 4] = [
    ("amenity", "Amenity"),
    ("tourism", "Tourism"),
    ("addr:street", "Address"),
    ("addr:postcode", "Postcode"),
];

/// Content of a popup: a title, labelled rows and an optional action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    /// Header line.
    pub title: String,
    /// `(label, value)` pairs.
    pub rows: Vec<(String, String)>,
    /// Label of the action button. The surface reports a click on it as
    /// [`MapEvent::PopupAction`](crate::surface::MapEvent::PopupAction).
    pub action: Option<String>,
}

impl Popup {
    /// Renders the popup as an HTML fragment for surfaces drawing popups with the browser.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div class=\"feature-popup\"><h3>{}</h3>",
            escape(&self.title)
        );
        for (label, value) in &self.rows {
            html.push_str(&format!("<p>{}: {}</p>", escape(label), escape(value)));
        }
        if let Some(action) = &self.action {
            html.push_str(&format!(
                "<button class=\"popup-action\">{}</button>",
                escape(action)
            ));
        }
        html.push_str("</div>");

        html
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_is_escaped() {
        let popup = Popup {
            title: "Café <Bar> & 'Grill'".into(),
            rows: vec![("Amenity".into(), "bar".into())],
            action: Some(ROUTE_ACTION_LABEL.into()),
        };

        assert_eq!(
            popup.to_html(),
            "<div class=\"feature-popup\"><h3>Café &lt;Bar&gt; &amp; &#39;Grill&#39;</h3>\
             <p>Amenity: bar</p>\
             <button class=\"popup-action\">Route to this destination</button></div>"
        );
    }
}
