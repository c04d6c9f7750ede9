//! Booking choices shown after a clinic triage.

/// One booking card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingChoice {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
    /// Where the card leads.
    pub href: String,
}

/// The booking-options block: a heading and the two booking cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOptions {
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub choices: Vec<BookingChoice>,
}

impl BookingOptions {
    /// Build the block with cards linking under `base` (e.g. `/clinics`).
    pub fn for_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            heading: "How would you like to proceed?",
            subtitle: "Choose your preferred booking method",
            choices: vec![
                BookingChoice {
                    icon: "📅",
                    title: "Book Appointment Directly",
                    description: "Quick booking - Select clinic, date, and time",
                    action_label: "Book Now",
                    href: format!("{base}?booking=direct"),
                },
                BookingChoice {
                    icon: "💬",
                    title: "Book with AI Assistant",
                    description: "Select clinic and chat with their AI assistant",
                    action_label: "Choose Clinic",
                    href: format!("{base}?booking=ai"),
                },
            ],
        }
    }
}
