//! DOM selector table for the portal under test
//!
//! Every selector the journey touches lives here, grouped by step, so a
//! portal UI change is a one-file edit. The expressions are fixed
//! identifiers, class names, and positional XPath against the portal's
//! current DOM, brittle by construction; that is the contract.

use crate::browser::dom::Selector;

/// Shared across steps
pub mod common {
    use super::*;

    /// The modal the portal raises when a server-side operation completes
    pub fn confirmation_dialog() -> Selector {
        Selector::css("#swal2-html-container")
    }
}

/// Step 1: login
pub mod login {
    use super::*;

    pub fn email() -> Selector {
        Selector::css("#email")
    }

    pub fn password() -> Selector {
        Selector::css("#password")
    }

    pub fn submit() -> Selector {
        Selector::css(".login-button")
    }

    pub fn welcome_banner() -> Selector {
        Selector::css(".header-title")
    }
}

/// Step 2: open target portal
pub mod portal {
    use super::*;

    pub fn search_box() -> Selector {
        Selector::xpath("//input[@placeholder='Search portal']")
    }

    pub fn edit_button() -> Selector {
        Selector::xpath("//button[normalize-space()='Edit']")
    }

    pub fn branding_title() -> Selector {
        Selector::xpath("(//p[@class='branding-information-text mt-1'])[1]")
    }
}

/// Step 3: create webcast
pub mod webcast {
    use super::*;

    pub fn sessions_tab() -> Selector {
        Selector::xpath("//div[contains(text(),'Sessions')]")
    }

    pub fn creation_menu() -> Selector {
        Selector::xpath("//div[@class='session-button-group-right']")
    }

    pub fn new_webcast_option() -> Selector {
        Selector::xpath("(//div[@class='stream-modal-container h-full'])[1]")
    }

    pub fn title_input() -> Selector {
        Selector::css("#streamName")
    }

    pub fn next_button() -> Selector {
        Selector::xpath("//button[normalize-space()='Next']")
    }

    pub fn date_input() -> Selector {
        Selector::xpath("//input[@placeholder='Select date']")
    }

    /// Day cell in the date picker
    pub fn date_day(day: &str) -> Selector {
        Selector::xpath(format!("//div[normalize-space()='{day}']"))
    }

    pub fn time_input() -> Selector {
        Selector::xpath("//input[@placeholder='Select time']")
    }

    /// Hour entry in the time picker's hour column
    pub fn time_hour(hour: &str) -> Selector {
        Selector::xpath(format!(
            "//ul[@data-type='hour']//div[normalize-space()='{hour}']"
        ))
    }

    pub fn duration_input() -> Selector {
        Selector::xpath("//input[@placeholder='Select duration']")
    }

    /// Duration entry; the third match is the duration picker's column
    pub fn duration_value(value: &str) -> Selector {
        Selector::xpath(format!("(//div[normalize-space()='{value}'])[3]"))
    }

    pub fn create_button() -> Selector {
        Selector::xpath("//button[contains(@class,'save-button')]")
    }
}

/// Steps 4 and 7: media upload
pub mod media {
    use super::*;

    pub fn content_tab() -> Selector {
        Selector::xpath("(//button[normalize-space()='Content'])[1]")
    }

    pub fn slide_input() -> Selector {
        Selector::xpath("(//input[@type='file'])[1]")
    }

    pub fn video_input() -> Selector {
        Selector::xpath("(//input[@type='file'])[2]")
    }

    pub fn save_first() -> Selector {
        Selector::xpath("(//button[normalize-space()='Save'])[1]")
    }

    pub fn save() -> Selector {
        Selector::xpath("//button[normalize-space()='Save']")
    }
}

/// Step 5: activate and manage
pub mod activation {
    use super::*;

    pub fn summary_cards() -> Selector {
        Selector::css(".webcast-summary")
    }

    /// Event name inside a summary card (relative to the card)
    pub fn card_event_name() -> Selector {
        Selector::xpath(
            ".//div[contains(@class,'webcast-summary-event-name')]\
             //div[contains(@class,'webcast-summary-background')]",
        )
    }

    /// Activate control inside a summary card
    pub fn card_activate_button() -> Selector {
        Selector::xpath(".//div[contains(@class,'webcast-summary-activate')]//button")
    }

    /// Manage control inside a summary card
    pub fn card_manage_button() -> Selector {
        Selector::xpath(".//div[contains(@class,'webcast-manage-column')]//button")
    }
}

/// Step 6: configure layout
pub mod layout {
    use super::*;

    pub fn layout_tab() -> Selector {
        Selector::xpath("(//button[normalize-space()='Webcast Layout'])[1]")
    }

    pub fn preview_title() -> Selector {
        Selector::xpath("//input[@placeholder='Title']")
    }

    pub fn preview_description() -> Selector {
        Selector::xpath("//input[@placeholder='Description']")
    }

    /// Toggle switch by position in the layout panel
    pub fn switch(position: usize) -> Selector {
        Selector::xpath(format!("(//button[@role='switch'])[{position}]"))
    }

    pub fn save() -> Selector {
        Selector::xpath("//button[normalize-space()='Save']")
    }
}

/// Step 7: toggle status
pub mod status {
    use super::*;

    /// The status dropdown, titled with the current status
    pub fn current(status: &str) -> Selector {
        Selector::xpath(format!("//span[@title='{status}']"))
    }

    /// A status option in the opened dropdown
    pub fn option(status: &str) -> Selector {
        Selector::xpath(format!("//div[contains(text(),'{status}')]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(sel: &Selector) {
        match sel {
            Selector::Css(s) => assert!(!s.is_empty()),
            Selector::XPath(s) => {
                assert!(!s.is_empty());
                assert!(
                    s.starts_with("//") || s.starts_with("(") || s.starts_with(".//"),
                    "unexpected XPath shape: {s}"
                );
            }
        }
    }

    #[test]
    fn every_table_entry_is_well_formed() {
        let all = [
            common::confirmation_dialog(),
            login::email(),
            login::password(),
            login::submit(),
            login::welcome_banner(),
            portal::search_box(),
            portal::edit_button(),
            portal::branding_title(),
            webcast::sessions_tab(),
            webcast::creation_menu(),
            webcast::new_webcast_option(),
            webcast::title_input(),
            webcast::next_button(),
            webcast::date_input(),
            webcast::date_day("25"),
            webcast::time_input(),
            webcast::time_hour("03"),
            webcast::duration_input(),
            webcast::duration_value("01"),
            webcast::create_button(),
            media::content_tab(),
            media::slide_input(),
            media::video_input(),
            media::save_first(),
            media::save(),
            activation::summary_cards(),
            activation::card_event_name(),
            activation::card_activate_button(),
            activation::card_manage_button(),
            layout::layout_tab(),
            layout::preview_title(),
            layout::preview_description(),
            layout::switch(2),
            layout::save(),
            status::current("Preview"),
            status::option("Live"),
        ];
        for sel in &all {
            assert_well_formed(sel);
        }
    }

    #[test]
    fn card_selectors_are_relative() {
        for sel in [
            activation::card_event_name(),
            activation::card_activate_button(),
            activation::card_manage_button(),
        ] {
            match sel {
                Selector::XPath(s) => assert!(s.starts_with(".//")),
                _ => panic!("card selectors must be relative XPath"),
            }
        }
    }

    #[test]
    fn parameterized_selectors_embed_their_argument() {
        assert_eq!(
            status::current("Live"),
            Selector::xpath("//span[@title='Live']")
        );
        assert_eq!(
            layout::switch(6),
            Selector::xpath("(//button[@role='switch'])[6]")
        );
    }
}
