use crate::map::NameValues;
use crate::value::Value;
use lazy_static::lazy_static;
use log::trace;
use regex::{Captures, Regex};

/// Matches `${name}` where the name is a possibly empty run of ASCII letters,
/// digits and underscores.
pub const INTERPOLATE_PATTERN: &str = r"\$\{([[:word:]]*)\}";

/// Substituted for placeholders with no matching entry. It reads as both an
/// empty-ish string and the number zero when the values are bound downstream.
pub const MISSING_PLACEHOLDER: &str = "0";

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(INTERPOLATE_PATTERN).expect("placeholder pattern compiles");
}

/// Replaces every `${name}` in `template` with the display text of the
/// matching entry.
///
/// Names match case-insensitively. A placeholder with no entry becomes `"0"`.
/// The second result lists the substituted values in the order their
/// placeholders appear, repeats included, so it can be bound positionally;
/// missing entries contribute the string `"0"`.
///
/// # Examples
///
/// ```
/// use sovran_namevalue::{interpolate, NameValues, Value};
///
/// let person = NameValues::new([("name", "Zaldy"), ("age", "48")]);
/// let (text, args) = interpolate("Hello ${NAME}, age ${age}, id ${id}", &person);
///
/// assert_eq!(text, "Hello Zaldy, age 48, id 0");
/// assert_eq!(args, vec![Value::from("Zaldy"), Value::from("48"), Value::from("0")]);
/// ```
pub fn interpolate(template: &str, values: &NameValues) -> (String, Vec<Value>) {
    let mut substituted = Vec::new();
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        match values.opt_plain(name) {
            Some(value) => {
                substituted.push(value.clone());
                value.to_string()
            }
            None => {
                trace!("no value for placeholder {:?}", &caps[0]);
                substituted.push(Value::from(MISSING_PLACEHOLDER));
                MISSING_PLACEHOLDER.to_string()
            }
        }
    });
    (rendered.into_owned(), substituted)
}
