use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::db::UserRow;

/// Minimal login form. The hardened variant passes a CSRF token to embed;
/// the injectable variant passes `None` and gets the bare form.
#[must_use]
pub fn login_form(csrf_token: Option<&str>) -> String {
    let mut form = String::from("<form method=\"post\">\n");
    push_csrf_field(&mut form, csrf_token);
    form.push_str("Username: <input type=\"text\" name=\"username\"><br>\n");
    form.push_str("Password: <input type=\"password\" name=\"password\"><br>\n");
    form.push_str("<input type=\"submit\" value=\"Login\">\n");
    form.push_str("</form>");
    form
}

#[must_use]
pub fn search_form(csrf_token: Option<&str>) -> String {
    let mut form = String::from("<form method=\"post\">\n");
    push_csrf_field(&mut form, csrf_token);
    form.push_str("Search: <input type=\"text\" name=\"search\">\n");
    form.push_str("<input type=\"submit\" value=\"Search\">\n");
    form.push_str("</form>");
    form
}

#[must_use]
pub fn search_results_page(results: &[UserRow]) -> String {
    let mut page = String::from("<h2>Search Results:</h2>\n");
    for user in results {
        page.push_str(&user_line(user));
        page.push('\n');
    }
    page.push_str("<a href=\"/search\">Back to Search</a>");
    page
}

#[must_use]
pub fn users_page(users: &[UserRow]) -> String {
    let mut page = String::from("<h2>All Users:</h2>\n");
    for user in users {
        page.push_str(&user_line(user));
        page.push('\n');
    }
    page
}

fn push_csrf_field(form: &mut String, csrf_token: Option<&str>) {
    if let Some(token) = csrf_token {
        form.push_str(&format!(
            "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\n",
            encode_double_quoted_attribute(token)
        ));
    }
}

/// One `username (email) - role` line, HTML-escaped field by field.
fn user_line(user: &UserRow) -> String {
    format!(
        "<p>{} ({}) - {}</p>",
        encode_text(&user.username),
        encode_text(&user.email),
        encode_text(&user.role)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: &str, email: &str, role: &str) -> UserRow {
        UserRow {
            username: username.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_login_form_without_token_has_no_hidden_field() {
        let form = login_form(None);
        assert!(form.contains("name=\"username\""));
        assert!(form.contains("name=\"password\""));
        assert!(!form.contains("csrf_token"));
    }

    #[test]
    fn test_login_form_embeds_token() {
        let form = login_form(Some("abc123"));
        assert!(form.contains("name=\"csrf_token\" value=\"abc123\""));
    }

    #[test]
    fn test_users_page_lists_each_user() {
        let users = vec![
            row("admin", "admin@example.com", "admin"),
            row("john_doe", "john@example.com", "user"),
        ];
        let page = users_page(&users);
        assert!(page.starts_with("<h2>All Users:</h2>"));
        assert!(page.contains("<p>admin (admin@example.com) - admin</p>"));
        assert!(page.contains("<p>john_doe (john@example.com) - user</p>"));
    }

    #[test]
    fn test_search_results_page_links_back() {
        let page = search_results_page(&[]);
        assert!(page.starts_with("<h2>Search Results:</h2>"));
        assert!(page.ends_with("<a href=\"/search\">Back to Search</a>"));
    }

    #[test]
    fn test_user_fields_are_escaped() {
        let page = users_page(&[row("<script>", "a&b@example.com", "user")]);
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("a&amp;b@example.com"));
        assert!(!page.contains("<script>"));
    }
}
