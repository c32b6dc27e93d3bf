//! Command line handling.

pub const USAGE: &str = "spriteblit <background-image>";

/// The background image path, if exactly one argument was given.
pub fn background_arg<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(path), None) => Some(path),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exactly_one_argument() {
        assert_eq!(background_arg(args(&["bg.png"])), Some("bg.png".into()));
        assert_eq!(background_arg(args(&[])), None);
        assert_eq!(background_arg(args(&["bg.png", "extra"])), None);
    }
}
