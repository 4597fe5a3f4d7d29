//! Maths, comparison and logic commands
//!
//! All arithmetic is checked 64-bit: overflow and division by zero are
//! fatal. Comparisons produce `0`/`1`. The `Int`-patterned overloads here
//! broadcast element-wise over lists via the dispatcher, so `²` squares a
//! whole list and `+` zips two of them without any list code below.

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::ParamPattern as P;
use crate::interpreter::registry::{cmd, ov, CommandSignature};
use crate::values::{List, Value};

pub(crate) fn checked_add(a: i64, b: i64) -> Result<i64, RuntimeError> {
    a.checked_add(b).ok_or(RuntimeError::Overflow {
        operation: format!("{} + {}", a, b),
        span: None,
    })
}

pub(crate) fn checked_sub(a: i64, b: i64) -> Result<i64, RuntimeError> {
    a.checked_sub(b).ok_or(RuntimeError::Overflow {
        operation: format!("{} - {}", a, b),
        span: None,
    })
}

pub(crate) fn checked_mul(a: i64, b: i64) -> Result<i64, RuntimeError> {
    a.checked_mul(b).ok_or(RuntimeError::Overflow {
        operation: format!("{} × {}", a, b),
        span: None,
    })
}

/// Floor division, matching the sign conventions the original ran on.
pub(crate) fn floor_div(a: i64, b: i64) -> Result<i64, RuntimeError> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero {
            operation: format!("{} ÷ {}", a, b),
            span: None,
        });
    }
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Modulo with the divisor's sign, the floor-division companion.
pub(crate) fn floor_mod(a: i64, b: i64) -> Result<i64, RuntimeError> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero {
            operation: format!("{} % {}", a, b),
            span: None,
        });
    }
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn checked_pow(x: i64, n: i64) -> Result<i64, RuntimeError> {
    if n < 0 {
        return Err(RuntimeError::Domain {
            message: format!("negative exponent {} in integer power", n),
            span: None,
        });
    }
    let exponent = u32::try_from(n).map_err(|_| RuntimeError::Overflow {
        operation: format!("{} * {}", x, n),
        span: None,
    })?;
    x.checked_pow(exponent).ok_or(RuntimeError::Overflow {
        operation: format!("{} * {}", x, n),
        span: None,
    })
}

fn factorial(n: i64) -> Result<i64, RuntimeError> {
    if n < 0 {
        return Err(RuntimeError::Domain {
            message: format!("factorial of negative {}", n),
            span: None,
        });
    }
    let mut acc: i64 = 1;
    for k in 2..=n {
        acc = checked_mul(acc, k)?;
    }
    Ok(acc)
}

fn binomial(n: i64, r: i64) -> Result<i64, RuntimeError> {
    if r < 0 || r > n {
        return Ok(0);
    }
    let r = r.min(n - r);
    let mut acc: i128 = 1;
    for k in 0..r {
        acc = acc * (n - k) as i128 / (k + 1) as i128;
    }
    i64::try_from(acc).map_err(|_| RuntimeError::Overflow {
        operation: format!("{} ‼ {}", n, r),
        span: None,
    })
}

fn isqrt(n: i64) -> Result<i64, RuntimeError> {
    if n < 0 {
        return Err(RuntimeError::Domain {
            message: format!("square root of negative {}", n),
            span: None,
        });
    }
    let mut root = (n as f64).sqrt() as i64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    Ok(root)
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn truthy_number(flag: bool) -> Value {
    Value::Number(flag as i64)
}

pub(crate) fn commands() -> Vec<CommandSignature> {
    vec![
        cmd('~', "neg", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "negate",
            |_, _, a| Ok(Some(Value::Number(-a.num(0)?))),
        )]),
        cmd('+', "add", (2, 0, 0, false), vec![
            ov(&[P::Int, P::Int], "addition", |_, _, a| {
                Ok(Some(Value::Number(checked_add(a.num(0)?, a.num(1)?)?)))
            }),
            ov(&[P::Null, P::Any], "addition to null", |_, _, a| Ok(Some(a.value(1)))),
            ov(&[P::Coordinate, P::Coordinate], "coordinate addition", |_, _, a| {
                Ok(Some(Value::Coordinate(a.coordinate(0)?.add(&a.coordinate(1)?))))
            }),
        ]),
        cmd('×', "mul", (2, 0, 0, false), vec![
            ov(&[P::Int, P::Int], "multiply", |_, _, a| {
                Ok(Some(Value::Number(checked_mul(a.num(0)?, a.num(1)?)?)))
            }),
            ov(&[P::Null, P::Int], "multiply null", |_, _, a| Ok(Some(a.value(1)))),
            ov(&[P::Str, P::Int], "string repeat", |_, _, a| {
                let count = a.num(1)?.max(0) as usize;
                Ok(Some(Value::Text(a.text(0)?.repeat(count))))
            }),
            ov(&[P::Coordinate, P::Int], "scalar multiply", |_, _, a| {
                Ok(Some(Value::Coordinate(a.coordinate(0)?.scale(a.num(1)?))))
            }),
        ]),
        cmd('-', "sub", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "subtract",
            |_, _, a| Ok(Some(Value::Number(checked_sub(a.num(0)?, a.num(1)?)?))),
        )]),
        cmd('÷', "div", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "integer divide",
            |_, _, a| Ok(Some(Value::Number(floor_div(a.num(0)?, a.num(1)?)?))),
        )]),
        cmd('%', "mod", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "modulo division",
            |_, _, a| Ok(Some(Value::Number(floor_mod(a.num(0)?, a.num(1)?)?))),
        )]),
        cmd('‰', "divisible by", (1, 1, 0, false), vec![ov(
            &[P::Int, P::Int],
            "is divisible by",
            |_, _, a| Ok(Some(truthy_number(floor_mod(a.num(0)?, a.num(1)?)? == 0))),
        )]),
        cmd('‱', "divisible", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "is divisible by",
            |_, _, a| Ok(Some(truthy_number(floor_mod(a.num(0)?, a.num(1)?)? == 0))),
        )]),
        cmd('|', "divides", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "a divides b",
            |_, _, a| Ok(Some(truthy_number(floor_mod(a.num(1)?, a.num(0)?)? == 0))),
        )]),
        cmd('ℸ', "prime factors", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "list of prime factors",
            |_, _, a| Ok(Some(Value::List(List::prime_factors(a.num(0)?)))),
        )]),
        cmd('𝜋', "primes", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "list of primes up to n",
            |_, _, a| Ok(Some(Value::List(List::primes_up_to(a.num(0)?)))),
        )]),
        cmd('⩲', "abs", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "absolute value",
            |_, _, a| Ok(Some(Value::Number(a.num(0)?.abs()))),
        )]),
        cmd('²', "sqr", (1, 0, 0, false), vec![ov(&[P::Int], "square", |_, _, a| {
            let x = a.num(0)?;
            Ok(Some(Value::Number(checked_mul(x, x)?)))
        })]),
        cmd('√', "sqrt", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "integer square root",
            |_, _, a| Ok(Some(Value::Number(isqrt(a.num(0)?)?))),
        )]),
        cmd('⊛', "log2", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "integer log base 2",
            |_, _, a| {
                let x = a.num(0)?;
                if x <= 0 {
                    return Err(RuntimeError::Domain {
                        message: format!("log2 of non-positive {}", x),
                        span: None,
                    });
                }
                Ok(Some(Value::Number(63 - x.leading_zeros() as i64)))
            },
        )]),
        cmd('±', "sign", (1, 0, 0, false), vec![
            ov(&[P::Int], "sign of value as -1, 0 or 1", |_, _, a| {
                Ok(Some(Value::Number(a.num(0)?.signum())))
            }),
            ov(&[P::Coordinate], "grid distance from origin", |_, _, a| {
                Ok(Some(Value::Number(a.coordinate(0)?.grid_len())))
            }),
        ]),
        cmd('*', "pow", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "power x^n",
            |_, _, a| Ok(Some(Value::Number(checked_pow(a.num(0)?, a.num(1)?)?))),
        )]),
        cmd('⨸', "gcd", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "greatest common divisor",
            |_, _, a| Ok(Some(Value::Number(gcd(a.num(0)?, a.num(1)?)))),
        )]),
        cmd('⩓', "inc", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "increment by 1",
            |_, _, a| Ok(Some(Value::Number(checked_add(a.num(0)?, 1)?))),
        )]),
        cmd('⩔', "dec", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "decrement by 1",
            |_, _, a| Ok(Some(Value::Number(checked_sub(a.num(0)?, 1)?))),
        )]),
        cmd('!', "factorial", (1, 0, 0, false), vec![ov(
            &[P::Int],
            "factorial n!",
            |_, _, a| Ok(Some(Value::Number(factorial(a.num(0)?)?))),
        )]),
        cmd('‼', "binomial", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "nCr binomial coefficient",
            |_, _, a| Ok(Some(Value::Number(binomial(a.num(0)?, a.num(1)?)?))),
        )]),
        cmd('⌈', "max", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "maximum value",
            |_, _, a| Ok(Some(Value::Number(a.num(0)?.max(a.num(1)?)))),
        )]),
        cmd('⌊', "min", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "minimum value",
            |_, _, a| Ok(Some(Value::Number(a.num(0)?.min(a.num(1)?)))),
        )]),
        cmd('=', "eq", (2, 0, 0, false), vec![
            ov(&[P::Int, P::Int], "equal?", |_, _, a| {
                Ok(Some(truthy_number(a.num(0)? == a.num(1)?)))
            }),
            ov(&[P::Str, P::Str], "string equal?", |_, _, a| {
                Ok(Some(truthy_number(a.text(0)? == a.text(1)?)))
            }),
            ov(&[P::Any, P::Any], "equal?", |_, _, a| {
                Ok(Some(truthy_number(a.value(0) == a.value(1))))
            }),
        ]),
        cmd('≠', "neq", (2, 0, 0, false), vec![
            ov(&[P::Int, P::Int], "not equal?", |_, _, a| {
                Ok(Some(truthy_number(a.num(0)? != a.num(1)?)))
            }),
            ov(&[P::Str, P::Str], "string not equal?", |_, _, a| {
                Ok(Some(truthy_number(a.text(0)? != a.text(1)?)))
            }),
            ov(&[P::Any, P::Any], "not equal?", |_, _, a| {
                Ok(Some(truthy_number(a.value(0) != a.value(1))))
            }),
        ]),
        cmd('<', "lt", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "less than?",
            |_, _, a| Ok(Some(truthy_number(a.num(0)? < a.num(1)?))),
        )]),
        cmd('≤', "lte", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "less than or equal?",
            |_, _, a| Ok(Some(truthy_number(a.num(0)? <= a.num(1)?))),
        )]),
        cmd('>', "gt", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "greater than?",
            |_, _, a| Ok(Some(truthy_number(a.num(0)? > a.num(1)?))),
        )]),
        cmd('≥', "gte", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "greater than or equal?",
            |_, _, a| Ok(Some(truthy_number(a.num(0)? >= a.num(1)?))),
        )]),
        cmd('¬', "not", (1, 0, 0, false), vec![
            ov(&[P::Int], "logical not", |_, _, a| {
                Ok(Some(truthy_number(a.num(0)? == 0)))
            }),
            ov(&[P::Any], "logical not", |_, _, a| {
                Ok(Some(truthy_number(!a.value(0).truthy())))
            }),
        ]),
        cmd('∧', "and", (2, 0, 0, false), vec![
            ov(&[P::Int, P::Int], "logical and", |_, _, a| {
                let (x, y) = (a.num(0)?, a.num(1)?);
                Ok(Some(Value::Number(if x == 0 { x } else { y })))
            }),
            ov(&[P::Any, P::Any], "logical and", |_, _, a| {
                let x = a.value(0);
                Ok(Some(if x.truthy() { a.value(1) } else { x }))
            }),
        ]),
        cmd('∨', "or", (2, 0, 0, false), vec![
            ov(&[P::Int, P::Int], "logical or", |_, _, a| {
                let (x, y) = (a.num(0)?, a.num(1)?);
                Ok(Some(Value::Number(if x != 0 { x } else { y })))
            }),
            ov(&[P::Any, P::Any], "logical or", |_, _, a| {
                let x = a.value(0);
                Ok(Some(if x.truthy() { x } else { a.value(1) }))
            }),
        ]),
        cmd('⟘', "binary", (2, 0, 0, false), vec![ov(
            &[P::Int, P::Int],
            "binary value as list of length n",
            |_, _, a| {
                let (x, width) = (a.num(0)?, a.num(1)?.max(0) as usize);
                let bits: Vec<i64> = (0..width)
                    .rev()
                    .map(|bit| (x >> bit) & 1)
                    .collect();
                Ok(Some(Value::List(List::from_numbers(bits))))
            },
        )]),
        cmd('⊤', "from binary", (1, 0, 0, false), vec![
            ov(&[P::Str], "binary string to integer", |_, _, a| {
                let digits: String =
                    a.text(0)?.chars().filter(|c| *c == '0' || *c == '1').collect();
                if digits.is_empty() {
                    return Err(RuntimeError::Domain {
                        message: "no binary digits in string".to_string(),
                        span: None,
                    });
                }
                i64::from_str_radix(&digits, 2)
                    .map(|n| Some(Value::Number(n)))
                    .map_err(|_| RuntimeError::Overflow {
                        operation: "binary conversion".to_string(),
                        span: None,
                    })
            }),
            ov(&[P::List], "boolean list to integer", |_, _, a| {
                let mut n: i64 = 0;
                for v in a.list(0)?.raw() {
                    n = checked_add(checked_mul(n, 2)?, v.truthy() as i64)?;
                }
                Ok(Some(Value::Number(n)))
            }),
        ]),
    ]
}
