use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub verified: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Александр Петров".to_owned(),
            email: "a.petrov@example.com".to_owned(),
            phone: "+7 (495) 123-45-67".to_owned(),
            verified: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub bid_updates: bool,
    pub new_lots: bool,
    pub outbid: bool,
    pub newsletter: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            bid_updates: true,
            new_lots: true,
            outbid: true,
            newsletter: false,
        }
    }
}
