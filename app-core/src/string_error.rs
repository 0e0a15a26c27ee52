/// Attach context to an error and flatten it into the `Result<_, String>`
/// shape used throughout the frontend.
pub trait ErrorStringExt<T> {
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E> ErrorStringExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|error| format!("{context}: {error}"))
    }
}
