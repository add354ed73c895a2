mod theme;

pub use theme::{ThemePreferenceUseCase, DARK_MODE_KEY};
