//! Loose cross-type ordering
//!
//! Field and key rules compare values of possibly different types. The
//! ordering here keeps the loose semantics callers of dynamic collections
//! rely on: `"2"` and `2` are equal, `null` is equal to `false` and `""`.
//!
//! Ordering rules:
//! - null vs null: equal
//! - bool vs anything: both sides compared by truthiness (false < true)
//! - null vs string: `""` vs the string
//! - null vs anything else: compared by truthiness
//! - number vs number: numeric
//! - numeric strings compare numerically against numbers and each other
//! - any other string pairing: byte-wise, numbers rendered as strings
//! - arrays: by length, then element-wise
//! - objects: by size, then per key of the left side
//! - arrays and objects sort after scalars, objects after arrays

use std::cmp::Ordering;

use serde_json::{Map, Number, Value};

/// Compares two JSON values with loose cross-type semantics.
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(_), _) | (_, Value::Bool(_)) => truthy(a).cmp(&truthy(b)),
        (Value::Null, Value::String(s)) => "".cmp(s.as_str()),
        (Value::String(s), Value::Null) => s.as_str().cmp(""),
        (Value::Null, _) | (_, Value::Null) => truthy(a).cmp(&truthy(b)),
        (Value::Number(x), Value::Number(y)) => Numeric::from_number(x).cmp(&Numeric::from_number(y)),
        (Value::Number(x), Value::String(s)) => compare_number_string(x, s),
        (Value::String(s), Value::Number(y)) => compare_number_string(y, s).reverse(),
        (Value::String(x), Value::String(y)) => match (Numeric::parse(x), Numeric::parse(y)) {
            (Some(nx), Some(ny)) => nx.cmp(&ny),
            _ => x.as_str().cmp(y.as_str()),
        },
        (Value::Array(x), Value::Array(y)) => compare_arrays(x, y),
        (Value::Object(x), Value::Object(y)) => compare_objects(x, y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Compares two optional values, treating an absent value as null.
pub fn loose_cmp_opt(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    static NULL: Value = Value::Null;
    loose_cmp(a.unwrap_or(&NULL), b.unwrap_or(&NULL))
}

/// Returns the boolean interpretation of a value.
///
/// `null`, `false`, zero, `""`, `"0"` and empty containers are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => match Numeric::from_number(n) {
            Numeric::Int(i) => i != 0,
            Numeric::Float(f) => f != 0.0,
        },
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Array(_) => 1,
        Value::Object(_) => 2,
        _ => 0,
    }
}

fn compare_number_string(n: &Number, s: &str) -> Ordering {
    match Numeric::parse(s) {
        Some(parsed) => Numeric::from_number(n).cmp(&parsed),
        None => n.to_string().as_str().cmp(s),
    }
}

fn compare_arrays(x: &[Value], y: &[Value]) -> Ordering {
    x.len().cmp(&y.len()).then_with(|| {
        x.iter()
            .zip(y)
            .map(|(a, b)| loose_cmp(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

fn compare_objects(x: &Map<String, Value>, y: &Map<String, Value>) -> Ordering {
    x.len().cmp(&y.len()).then_with(|| {
        for (key, a) in x {
            let ord = match y.get(key) {
                Some(b) => loose_cmp(a, b),
                None => return Ordering::Greater,
            };
            if ord.is_ne() {
                return ord;
            }
        }
        Ordering::Equal
    })
}

/// A number read from a JSON number or a numeric string.
#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Numeric::Int(i as i128)
        } else if let Some(u) = n.as_u64() {
            Numeric::Int(u as i128)
        } else {
            Numeric::Float(n.as_f64().unwrap_or(0.0))
        }
    }

    /// Parses a decimal numeric string, allowing surrounding whitespace,
    /// a sign, a fraction and an exponent. `inf`, `nan` and hex are rejected.
    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let body = s.strip_prefix(['+', '-']).unwrap_or(s);
        if !body.bytes().any(|b| b.is_ascii_digit())
            || !body
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        {
            return None;
        }

        if let Ok(i) = s.parse::<i128>() {
            return Some(Numeric::Int(i));
        }
        s.parse::<f64>().ok().map(Numeric::Float)
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a.cmp(b),
            _ => self
                .as_f64()
                .partial_cmp(&other.as_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// A value usable as the result of a key extractor.
///
/// Implemented for the primitive types, strings, [`Value`] (loose ordering),
/// `Option<K>` (absent first) and tuples up to four elements. Wrap any other
/// `Ord` type in [`Natural`].
pub trait SortKey {
    /// Compares two keys
    fn compare_key(&self, other: &Self) -> Ordering;
}

macro_rules! ord_sort_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl SortKey for $t {
                fn compare_key(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

ord_sort_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String);

macro_rules! float_sort_key {
    ($($t:ty),*) => {
        $(
            impl SortKey for $t {
                fn compare_key(&self, other: &Self) -> Ordering {
                    self.partial_cmp(other).unwrap_or(Ordering::Equal)
                }
            }
        )*
    };
}

float_sort_key!(f32, f64);

impl SortKey for Value {
    fn compare_key(&self, other: &Self) -> Ordering {
        loose_cmp(self, other)
    }
}

impl<K: SortKey + ?Sized> SortKey for &K {
    fn compare_key(&self, other: &Self) -> Ordering {
        (**self).compare_key(*other)
    }
}

impl<K: SortKey + ?Sized> SortKey for Box<K> {
    fn compare_key(&self, other: &Self) -> Ordering {
        (**self).compare_key(other)
    }
}

impl<K: SortKey> SortKey for Option<K> {
    fn compare_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.compare_key(b),
        }
    }
}

macro_rules! tuple_sort_key {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: SortKey),+> SortKey for ($($name,)+) {
            fn compare_key(&self, other: &Self) -> Ordering {
                Ordering::Equal
                    $(.then_with(|| self.$idx.compare_key(&other.$idx)))+
            }
        }
    };
}

tuple_sort_key!(A: 0, B: 1);
tuple_sort_key!(A: 0, B: 1, C: 2);
tuple_sort_key!(A: 0, B: 1, C: 2, D: 3);

/// Adapts any `Ord` type into a [`SortKey`] using its natural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Natural<T>(pub T);

impl<T: Ord> SortKey for Natural<T> {
    fn compare_key(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_string_equals_number() {
        assert_eq!(loose_cmp(&json!("2"), &json!(2)), Ordering::Equal);
        assert_eq!(loose_cmp(&json!(2), &json!("2.0")), Ordering::Equal);
        assert_eq!(loose_cmp(&json!("2"), &json!(3)), Ordering::Less);
        assert_eq!(loose_cmp(&json!(" 10"), &json!(9)), Ordering::Greater);
    }

    #[test]
    fn test_numeric_strings_compare_numerically() {
        assert_eq!(loose_cmp(&json!("10"), &json!("9")), Ordering::Greater);
        assert_eq!(loose_cmp(&json!("1e3"), &json!("1000")), Ordering::Equal);
    }

    #[test]
    fn test_plain_strings_compare_bytewise() {
        assert_eq!(loose_cmp(&json!("Germany"), &json!("Netherlands")), Ordering::Less);
        assert_eq!(loose_cmp(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(loose_cmp(&json!("abc"), &json!("abc")), Ordering::Equal);
    }

    #[test]
    fn test_number_against_non_numeric_string() {
        // "10" renders before "abc"
        assert_eq!(loose_cmp(&json!(10), &json!("abc")), Ordering::Less);
        assert_eq!(loose_cmp(&json!("abc"), &json!(10)), Ordering::Greater);
        assert_eq!(loose_cmp(&json!("inf"), &json!(1)), Ordering::Greater);
    }

    #[test]
    fn test_null_semantics() {
        assert_eq!(loose_cmp(&Value::Null, &Value::Null), Ordering::Equal);
        assert_eq!(loose_cmp(&Value::Null, &json!(false)), Ordering::Equal);
        assert_eq!(loose_cmp(&Value::Null, &json!("")), Ordering::Equal);
        assert_eq!(loose_cmp(&Value::Null, &json!("a")), Ordering::Less);
        assert_eq!(loose_cmp(&Value::Null, &json!(0)), Ordering::Equal);
        assert_eq!(loose_cmp(&Value::Null, &json!(5)), Ordering::Less);
        assert_eq!(loose_cmp(&json!(-5), &Value::Null), Ordering::Greater);
    }

    #[test]
    fn test_bool_uses_truthiness() {
        assert_eq!(loose_cmp(&json!(true), &json!(3)), Ordering::Equal);
        assert_eq!(loose_cmp(&json!(false), &json!("0")), Ordering::Equal);
        assert_eq!(loose_cmp(&json!(false), &json!(true)), Ordering::Less);
        assert_eq!(loose_cmp(&json!([]), &json!(true)), Ordering::Less);
    }

    #[test]
    fn test_integers_compare_exactly() {
        let big = json!(9_007_199_254_740_993u64);
        let near = json!(9_007_199_254_740_992u64);
        assert_eq!(loose_cmp(&big, &near), Ordering::Greater);
    }

    #[test]
    fn test_containers() {
        assert_eq!(loose_cmp(&json!([1, 2]), &json!([1])), Ordering::Greater);
        assert_eq!(loose_cmp(&json!([1, "2"]), &json!([1, 2])), Ordering::Equal);
        assert_eq!(loose_cmp(&json!([9]), &json!("z")), Ordering::Greater);
        assert_eq!(loose_cmp(&json!({"a": 1}), &json!([1])), Ordering::Greater);
        assert_eq!(loose_cmp(&json!({"a": 1}), &json!({"b": 1})), Ordering::Greater);
        assert_eq!(loose_cmp(&json!({"a": 1}), &json!({"a": 2})), Ordering::Less);
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!({})));
        assert!(truthy(&json!("0.0")));
        assert!(truthy(&json!([0])));
    }

    #[test]
    fn test_absent_is_null() {
        assert_eq!(loose_cmp_opt(None, None), Ordering::Equal);
        assert_eq!(loose_cmp_opt(None, Some(&json!(""))), Ordering::Equal);
        assert_eq!(loose_cmp_opt(Some(&json!(1)), None), Ordering::Greater);
    }

    #[test]
    fn test_sort_key_impls() {
        assert_eq!(3i32.compare_key(&5), Ordering::Less);
        assert_eq!("b".compare_key(&"a"), Ordering::Greater);
        assert_eq!(f64::NAN.compare_key(&1.0), Ordering::Equal);
        assert_eq!(None::<u8>.compare_key(&Some(0)), Ordering::Less);
        assert_eq!(("a", 2).compare_key(&("a", 1)), Ordering::Greater);
        assert_eq!(
            Natural(vec![1, 2]).compare_key(&Natural(vec![1, 3])),
            Ordering::Less
        );
    }
}
