//! Vector wrapper tests

use bocchi_numeric::{ArithError, Complex, IntoVector, Vector};

fn v(values: &[f64]) -> Vector<f64> {
    Vector::from_slice(values)
}

// ============================================================
// Construction
// ============================================================

#[test]
fn test_zeros_and_ones() {
    let zeros = Vector::<f64>::zeros(5);
    let ones = Vector::<f64>::ones(5);
    assert_eq!(zeros.as_slice(), &[0.0; 5]);
    assert_eq!(ones.as_slice(), &[1.0; 5]);

    let unit = Vector::<Complex<f32>>::ones(2);
    assert_eq!(unit[1], Complex::new(1.0, 0.0));
}

#[test]
fn test_empty() {
    let empty = Vector::<f32>::zeros(0);
    assert!(empty.is_empty());
    assert!((&empty + &empty).is_empty());
}

#[test]
fn test_null_buffer() {
    let err = Vector::<f64>::try_from_buffer(None).unwrap_err();
    assert_eq!(err, ArithError::NullBuffer);

    let wrapped = Vector::try_from_buffer(Some(vec![1.0f32, 2.0])).unwrap();
    assert_eq!(wrapped.len(), 2);
}

#[test]
fn test_conversions() {
    let from_iter: Vector<i64> = (1..=4).collect();
    let from_vec = vec![1i64, 2, 3, 4].into_vector();
    assert_eq!(from_iter, from_vec);
    assert_eq!(from_vec.into_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn test_slice_views() {
    let values = [1.0f32, 2.0, 3.0];
    let v = Vector::from(&values[..]);
    let view: &[f32] = v.as_ref();
    assert_eq!(view, &values);

    let mut out = [0.0f32; 3];
    bocchi_numeric::kernel::mul_scalar(v.as_ref(), 2.0, &mut out).unwrap();
    assert_eq!(out, [2.0, 4.0, 6.0]);
}

#[test]
fn test_element_writes() {
    let mut v = Vector::<f64>::zeros(4);
    v[1] = 5.0;
    v.as_mut_slice()[3] = -1.0;
    assert_eq!(v.as_slice(), &[0.0, 5.0, 0.0, -1.0]);
    assert_eq!(v.len(), 4);
}

// ============================================================
// Operators
// ============================================================

#[test]
fn test_vector_add_sub() {
    let a = v(&[1.0, 2.0, 3.0]);
    let b = v(&[4.0, 5.0, 6.0]);

    assert_eq!((&a + &b).as_slice(), &[5.0, 7.0, 9.0]);
    assert_eq!((&a - &b).as_slice(), &[-3.0, -3.0, -3.0]);
    assert_eq!((a + b).as_slice(), &[5.0, 7.0, 9.0]);
}

#[test]
fn test_vector_mul_div() {
    let a = v(&[2.0, 4.0, 6.0, 8.0, 10.0]);
    let b = v(&[2.0, 2.0, 3.0, 4.0, 5.0]);

    assert_eq!((&a * &b).as_slice(), &[4.0, 8.0, 18.0, 32.0, 50.0]);
    assert_eq!((&a / &b).as_slice(), &[1.0, 2.0, 2.0, 2.0, 2.0]);
}

#[test]
fn test_scalar_operand_orders() {
    let a = v(&[4.0, 5.0, 6.0]);

    assert_eq!((&a - 3.0).as_slice(), &[1.0, 2.0, 3.0]);
    assert_eq!((3.0f64 - &a).as_slice(), &[-1.0, -2.0, -3.0]);
    assert_eq!((&a + 1.0), (1.0f64 + &a));
    assert_eq!((&a * 2.0), (2.0f64 * &a));
    assert_eq!((&a / 2.0).as_slice(), &[2.0, 2.5, 3.0]);
    assert_eq!((60.0f64 / a).as_slice(), &[15.0, 12.0, 10.0]);
}

#[test]
fn test_operands_unchanged() {
    let a = v(&[1.0, 2.0, 3.0]);
    let b = v(&[4.0, 5.0, 6.0]);
    let _ = &a + &b;
    let _ = 3.0f64 - &a;
    assert_eq!(a, v(&[1.0, 2.0, 3.0]));
    assert_eq!(b, v(&[4.0, 5.0, 6.0]));
}

#[test]
fn test_integer_vectors() {
    let a: Vector<i32> = vec![10, 20, 30].into();
    assert_eq!((&a / 3).as_slice(), &[3, 6, 10]);
    assert_eq!((100i32 / &a).as_slice(), &[10, 5, 3]);
}

#[test]
fn test_complex_vectors() {
    let a = Vector::from_vec(vec![Complex::new(1.0, 2.0), Complex::new(3.0, -1.0)]);
    let b = Vector::from_vec(vec![Complex::new(0.0, 1.0), Complex::new(1.0, 1.0)]);

    let product = &a * &b;
    assert_eq!(product[0], Complex::new(-2.0, 1.0));
    assert_eq!(product[1], Complex::new(4.0, 2.0));

    let shifted = Complex::new(1.0f64, 0.0) - &a;
    assert_eq!(shifted[1], Complex::new(-2.0, 1.0));
}

#[test]
#[should_panic(expected = "all arguments must have the same length")]
fn test_operator_mismatch_panics() {
    let _ = v(&[1.0, 2.0]) + v(&[1.0, 2.0, 3.0]);
}

#[test]
fn test_try_mismatch() {
    let a = v(&[1.0, 2.0]);
    let b = v(&[1.0, 2.0, 3.0]);
    assert_eq!(
        a.try_sub(&b),
        Err(ArithError::LengthMismatch {
            expected: 2,
            actual: 3
        })
    );
}

// ============================================================
// In place
// ============================================================

#[test]
fn test_add_inplace() {
    let mut a = v(&[1.0, 2.0, 3.0]);
    a.add_inplace(&v(&[4.0, 5.0, 6.0])).unwrap();
    assert_eq!(a.as_slice(), &[5.0, 7.0, 9.0]);
}

#[test]
fn test_sub_inplace() {
    let mut a = v(&[1.0, 2.0, 3.0]);
    a.sub_inplace(&v(&[4.0, 5.0, 6.0])).unwrap();
    assert_eq!(a.as_slice(), &[-3.0, -3.0, -3.0]);
}

#[test]
fn test_inplace_mismatch_leaves_receiver() {
    let mut a = v(&[1.0, 2.0, 3.0]);
    let err = a.add_inplace(&v(&[1.0])).unwrap_err();
    assert_eq!(
        err,
        ArithError::LengthMismatch {
            expected: 3,
            actual: 1
        }
    );
    assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_self_aggregation() {
    let mut acc = v(&[1.0, 2.0, 3.0]);
    let copy = acc.clone();
    acc += &copy;
    acc *= 2.0;
    acc -= 1.0;
    assert_eq!(acc.as_slice(), &[3.0, 7.0, 11.0]);
}

#[test]
fn test_long_vector_accumulate() {
    let mut acc = Vector::<f32>::zeros(37);
    let ones = Vector::<f32>::ones(37);
    for _ in 0..10 {
        acc.add_inplace(&ones).unwrap();
    }
    assert!(acc.iter().all(|x| *x == 10.0));
}
