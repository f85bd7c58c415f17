//! Various utility functions.

use regex::{Regex, escape};
use itertools::Itertools;

use std::cmp::Reverse;

/// Constructs a regex which matches any string in `options`.
pub fn regex_opt<'a, I>(options: I) -> Regex
where I : IntoIterator<Item = &'a str> {
  regex_opt_with(options, |s| s)
}

/// Constructs a regex which matches any string in `options`. Applies
/// the function `helper` to the resulting regex string before
/// compilation. If the result of `helper` is not a valid regular
/// expression, this function will panic.
///
/// Empty strings in `options` are ignored, so that the result never
/// matches the empty string by accident.
pub fn regex_opt_with<'a, I, F>(options: I, helper: F) -> Regex
where I : IntoIterator<Item = &'a str>,
      F : FnOnce(String) -> String {
  // Put longer elements first, so we always match the longest thing
  // we can.
  let mut options: Vec<_> = options.into_iter().filter(|s| !s.is_empty()).collect();
  options.sort_by_key(|a| Reverse(a.len()));

  let regex_str = if options.is_empty() {
    // Matches nothing.
    String::from("[^\\s\\S]")
  } else {
    options.into_iter().map(escape).join("|")
  };
  let regex_str = helper(format!("(?:{regex_str})"));
  Regex::new(&regex_str).unwrap_or_else(|_| {
    panic!("Invalid regular expression: {}", regex_str);
  })
}
