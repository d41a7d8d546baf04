//! # sovran-namevalue
//!
//! Case-insensitive name-value collections with best-effort typed access.
//!
//! `sovran-namevalue` holds loosely-typed input, such as parsed form fields,
//! configuration rows or query results, and hands it back as whatever type the
//! caller asks for. A value stored as text can be read as an integer, a value
//! stored as an integer can be read as a decimal, and so on, without the caller
//! knowing in advance how the data arrived.
//!
//! ## Key Features
//!
//! - **Case-insensitive**: Names are lowercased once, when the collection is built
//! - **Best-effort coercion**: Text is parsed on demand; unusable values read as zero
//! - **Explicit existence**: Every accessor reports whether the name was present
//! - **Strict mode**: [`NameValues::try_get`] tells "absent" and "malformed" apart
//! - **Templates**: `${name}` placeholders are filled from the collection
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_namevalue::{NameValues, Value};
//!
//! let form = NameValues::new([
//!     ("Name", Value::from("Zaldy")),
//!     ("Age", Value::from("48")),
//!     ("Active", Value::from(true)),
//!     ("Tags", Value::from("rock,pop,blues")),
//! ]);
//!
//! // Names match in any casing
//! assert!(form.exists("NAME"));
//!
//! // Text is parsed into the requested type
//! let (age, exists) = form.int("age");
//! assert_eq!((age, exists), (48, true));
//!
//! // Native values are returned directly
//! assert_eq!(form.bool("active"), (true, true));
//!
//! // Comma-separated text reads as a list
//! assert_eq!(form.strings("tags"), vec!["rock", "pop", "blues"]);
//!
//! // Absent names report false alongside the zero value
//! assert_eq!(form.int64("height"), (0, false));
//! ```
//!
//! ### Absent Versus Malformed
//!
//! ```rust
//! use sovran_namevalue::{MapError, NameValues};
//!
//! let row = NameValues::new([("age", "forty-eight")]);
//!
//! // The lenient accessors only report presence
//! assert_eq!(row.int("age"), (0, true));
//! assert_eq!(row.opt_int("age"), Some(0));
//! assert_eq!(row.opt_int("height"), None);
//!
//! // The strict accessor reports why
//! match row.try_get::<i32>("age") {
//!     Ok(age) => println!("Age: {}", age),
//!     Err(MapError::KeyNotFound(name)) => println!("{} is missing", name),
//!     Err(MapError::Coerce { name, source }) => println!("{} is unusable: {}", name, source),
//! }
//! ```
//!
//! ### Generic Access
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use sovran_namevalue::NameValues;
//!
//! let row = NameValues::new([("price", "1,299.95"), ("qty", "3")]);
//!
//! let (price, _) = row.get::<Decimal>("price");
//! let (qty, _) = row.get::<u64>("qty");
//!
//! assert_eq!(price * Decimal::from(qty), "3899.85".parse::<Decimal>().unwrap());
//! ```
//!
//! ### Interpolation
//!
//! ```rust
//! use sovran_namevalue::{NameValues, Value};
//!
//! let person = NameValues::new([
//!     ("name", Value::from("Zaldy")),
//!     ("id", Value::from(1028i64)),
//! ]);
//!
//! let (sql, args) = person.interpolate("UPDATE users SET name='${name}' WHERE id=${ID}");
//!
//! assert_eq!(sql, "UPDATE users SET name='Zaldy' WHERE id=1028");
//! assert_eq!(args, vec![Value::from("Zaldy"), Value::from(1028i64)]);
//! ```
//!
//! ### Ordering
//!
//! ```rust
//! use sovran_namevalue::NameValues;
//!
//! let row = NameValues::new([("b", 2i64), ("a", 1i64), ("c", 3i64)]);
//! let ordered = row.sort_by_key(&["a", "b"]);
//!
//! assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

mod coerce;
mod error;
mod interpolate;
mod map;
mod order;
mod record;
mod value;

pub use coerce::{Scalar, DECIMAL_STRIP_CHARS, TRUE_LITERALS};
pub use error::{CoerceError, MapError};
pub use interpolate::{interpolate, INTERPOLATE_PATTERN, MISSING_PLACEHOLDER};
pub use map::{normalize_key, NameValues};
pub use order::sort_by_key;
pub use record::NameValue;
pub use value::{Kind, OpaqueValue, Value};
