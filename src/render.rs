// HTML for the entry form and the offer list

use crate::models::RoomOffer;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Hotel search</title>
</head>
<body>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

pub fn index_page() -> String {
    format!(
        r#"{PAGE_HEAD}<h1>Find a hotel</h1>
<form action="/search" method="post">
  <label>City <input type="text" name="city" required></label>
  <label>Check-in <input type="date" name="checkin" required></label>
  <label>Check-out <input type="date" name="checkout" required></label>
  <label>Adults <input type="number" name="adults" min="1" value="2" required></label>
  <button type="submit">Search</button>
</form>
{PAGE_TAIL}"#
    )
}

pub fn results_page(offers: &[RoomOffer]) -> String {
    let mut html = String::from(PAGE_HEAD);
    html.push_str("<h1>Available rooms</h1>\n");

    if offers.is_empty() {
        html.push_str("<p>No offers found.</p>\n");
    } else {
        html.push_str("<ul class=\"offers\">\n");
        for offer in offers {
            push_offer(&mut html, offer);
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<p><a href=\"/\">New search</a></p>\n");
    html.push_str(PAGE_TAIL);
    html
}

fn push_offer(html: &mut String, offer: &RoomOffer) {
    let room = offer.room_name.as_deref().unwrap_or("");
    let score = offer.score.as_deref().unwrap_or("");
    let rating = offer
        .rating_percentage
        .map(|percentage| format!("{}%", percentage))
        .unwrap_or_default();

    html.push_str(&format!(
        "<li class=\"offer\" data-price=\"{:.2}\">\n  <h2>{}</h2>\n  <h3>{}</h3>\n  <p class=\"price\">{}</p>\n  <p class=\"score\">{}</p>\n  <p class=\"rating\">{}</p>\n",
        offer.price_numeric,
        escape_html(&offer.hotel_name),
        escape_html(room),
        escape_html(&offer.price_display),
        escape_html(score),
        escape_html(&rating),
    ));
    if let Some(url) = &offer.image_url {
        html.push_str(&format!(
            "  <img src=\"{}\" alt=\"{}\">\n",
            escape_html(url),
            escape_html(room)
        ));
    }
    html.push_str("</li>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer() -> RoomOffer {
        RoomOffer {
            room_name: Some("King <Deluxe>".to_string()),
            price_display: "$1,234.00 total".to_string(),
            price_numeric: 1234.0,
            image_url: Some("https://img/a.jpg?w=1&h=2".to_string()),
            hotel_name: "Tom & Jerry's".to_string(),
            score: Some("8.5".to_string()),
            rating_percentage: Some(85.0),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_index_page_has_all_fields() {
        let html = index_page();
        for field in ["city", "checkin", "checkout", "adults"] {
            assert!(html.contains(&format!("name=\"{}\"", field)), "missing {}", field);
        }
        assert!(html.contains("action=\"/search\" method=\"post\""));
    }

    #[test]
    fn test_results_page_renders_escaped_offer() {
        let html = results_page(&[offer()]);

        assert!(html.contains("<h2>Tom &amp; Jerry&#39;s</h2>"));
        assert!(html.contains("<h3>King &lt;Deluxe&gt;</h3>"));
        assert!(html.contains("$1,234.00 total"));
        assert!(html.contains("data-price=\"1234.00\""));
        assert!(html.contains("<p class=\"rating\">85%</p>"));
        assert!(html.contains("src=\"https://img/a.jpg?w=1&amp;h=2\""));
    }

    #[test]
    fn test_results_page_blank_for_absent_fields() {
        let offer = RoomOffer {
            room_name: None,
            image_url: None,
            score: None,
            rating_percentage: None,
            ..offer()
        };
        let html = results_page(&[offer]);

        assert!(html.contains("<p class=\"score\"></p>"));
        assert!(html.contains("<p class=\"rating\"></p>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_offer_markup_layout() {
        let html = results_page(&[offer()]);
        let expected = "<li class=\"offer\" data-price=\"1234.00\">\n  <h2>Tom &amp; Jerry&#39;s</h2>\n  <h3>King &lt;Deluxe&gt;</h3>\n  <p class=\"price\">$1,234.00 total</p>\n  <p class=\"score\">8.5</p>\n  <p class=\"rating\">85%</p>\n  <img src=\"https://img/a.jpg?w=1&amp;h=2\" alt=\"King &lt;Deluxe&gt;\">\n</li>\n";
        assert!(html.contains(expected), "{}", html);
    }

    #[test]
    fn test_empty_results() {
        assert!(results_page(&[]).contains("No offers found."));
    }
}
