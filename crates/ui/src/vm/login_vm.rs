/// Login form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub registration_no: String,
    pub password: String,
}

impl LoginForm {
    /// Trimmed registration number and raw password, or the message to show.
    ///
    /// # Errors
    ///
    /// Returns a message when either field is blank.
    pub fn credentials(&self) -> Result<(&str, &str), &'static str> {
        let registration_no = self.registration_no.trim();
        if registration_no.is_empty() || self.password.is_empty() {
            return Err("Please enter your registration number and password");
        }
        Ok((registration_no, self.password.as_str()))
    }

    #[must_use]
    pub fn submit_label(loading: bool) -> &'static str {
        if loading { "Logging in..." } else { "Login" }
    }
}
