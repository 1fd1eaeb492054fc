pub mod alert;
pub mod search_bar;
pub mod title_banner;
pub mod weather_cards;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use alert::{AlertDialog, AlertDialogProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use title_banner::{TitleBanner, TitleBannerProps};
pub use weather_cards::{Card, WeatherCards, WeatherCardsProps, cards};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};
