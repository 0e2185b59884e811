use crate::{auth::repo_types::User, db::Document};

/// Case-fold an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Find a user by (already normalized) email.
    pub fn find_by_email<'a>(doc: &'a Document, email: &str) -> Option<&'a User> {
        doc.users.iter().find(|u| u.email == email)
    }

    pub fn find_by_email_mut<'a>(doc: &'a mut Document, email: &str) -> Option<&'a mut User> {
        doc.users.iter_mut().find(|u| u.email == email)
    }

    pub fn find_by_id_mut<'a>(doc: &'a mut Document, id: &str) -> Option<&'a mut User> {
        doc.users.iter_mut().find(|u| u.id == id)
    }

    /// Linear scan for the user holding `token`.
    pub fn find_by_session<'a>(doc: &'a Document, token: &str) -> Option<&'a User> {
        doc.users
            .iter()
            .find(|u| u.session.as_deref() == Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn user(email: &str, session: Option<&str>) -> User {
        User {
            id: format!("id-{email}"),
            email: email.into(),
            password_hash: "x".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            session: session.map(Into::into),
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }

    #[test]
    fn session_lookup_ignores_users_without_session() {
        let doc = Document {
            users: vec![user("a@x.com", None), user("b@x.com", Some("tok"))],
            ..Document::default()
        };
        assert_eq!(
            User::find_by_session(&doc, "tok").map(|u| u.email.as_str()),
            Some("b@x.com")
        );
        assert!(User::find_by_session(&doc, "other").is_none());
        assert!(User::find_by_session(&doc, "").is_none());
    }
}
