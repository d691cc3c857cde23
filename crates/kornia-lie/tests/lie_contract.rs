use kornia_lie::{orthonormal::is_orthonormal, LieError, RigidTransform, RotationMatrix, Tolerance};
use kornia_tensor::{Tensor2, Tensor3};
use rand::{rngs::StdRng, SeedableRng};

fn rotation_about(axis: usize, theta: f64) -> [[f64; 3]; 3] {
    let (s, c) = theta.sin_cos();
    let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
    let mut m = [[0.0; 3]; 3];
    m[axis][axis] = 1.0;
    m[a][a] = c;
    m[a][b] = -s;
    m[b][a] = s;
    m[b][b] = c;
    m
}

fn homogeneous(r: &[[f64; 3]; 3], t: [f64; 3]) -> Vec<f64> {
    let mut out = vec![0.0; 16];
    for i in 0..3 {
        for j in 0..3 {
            out[i * 4 + j] = r[i][j];
        }
        out[i * 4 + 3] = t[i];
    }
    out[15] = 1.0;
    out
}

#[test]
fn single_and_batched_inputs_store_the_same_value() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<f64> = rotation_about(1, 0.25).iter().flatten().copied().collect();

    let single = RotationMatrix::new(Tensor2::from_shape_slice([3, 3], &data)?)?;
    let batched = RotationMatrix::new(Tensor3::from_shape_slice([1, 3, 3], &data)?)?;

    assert_eq!(single.value().as_slice(), batched.value().as_slice());
    assert_eq!(single.value().shape, batched.value().shape);
    assert_eq!(single.shape(), &[3, 3]);
    assert_eq!(batched.shape(), &[1, 3, 3]);
    Ok(())
}

#[test]
fn one_bad_matrix_rejects_the_whole_batch() -> Result<(), Box<dyn std::error::Error>> {
    let mut data: Vec<f64> = Vec::new();
    for k in 0..6 {
        data.extend(rotation_about(k % 3, 0.1 * k as f64).iter().flatten());
    }
    // scale the third matrix
    data[2 * 9..3 * 9].iter_mut().for_each(|v| *v *= 1.01);

    let res = RotationMatrix::new(Tensor3::from_shape_vec([6, 3, 3], data)?);
    assert_eq!(
        res.err(),
        Some(LieError::OrthonormalityError {
            group: "SO3",
            invalid: vec![2]
        })
    );
    Ok(())
}

#[test]
fn single_and_batched_transforms_store_the_same_value() -> Result<(), Box<dyn std::error::Error>> {
    let data = homogeneous(&rotation_about(2, -0.6), [0.5, -1.0, 2.0]);

    let single = RigidTransform::new(Tensor2::from_shape_slice([4, 4], &data)?)?;
    let batched = RigidTransform::new(Tensor3::from_shape_slice([1, 4, 4], &data)?)?;

    assert_eq!(single.value().as_slice(), batched.value().as_slice());
    assert_eq!(single.value().shape, batched.value().shape);
    assert_eq!(single.shape(), &[4, 4]);
    assert_eq!(batched.shape(), &[1, 4, 4]);
    Ok(())
}

#[test]
fn one_bad_rotation_block_rejects_the_whole_transform_batch(
) -> Result<(), Box<dyn std::error::Error>> {
    let mut data: Vec<f64> = Vec::new();
    for k in 0..5 {
        let r = rotation_about(k % 3, 0.3 * k as f64);
        data.extend(homogeneous(&r, [k as f64, 0.0, -1.0]));
    }
    // shear the rotation block of the third transform, leaving its translation intact
    data[2 * 16 + 1] += 0.2;

    let res = RigidTransform::new(Tensor3::from_shape_vec([5, 4, 4], data)?);
    assert_eq!(
        res.err(),
        Some(LieError::OrthonormalityError {
            group: "SE3",
            invalid: vec![2]
        })
    );
    Ok(())
}

#[test]
fn random_rotations_are_valid_and_pass_through_se3() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(7);
    let rotations = RotationMatrix::<f64>::from_random(32, &mut rng)?;

    let mut data: Vec<f64> = Vec::new();
    for b in 0..rotations.batch_size() {
        let r = rotations.matrix(b).ok_or("missing rotation")?;
        data.extend(homogeneous(&r, [b as f64, -1.0, 2.5]));
    }
    let tf = RigidTransform::new(Tensor3::from_shape_vec([32, 4, 4], data)?)?;

    let (r, t) = tf.decompose();
    assert_eq!(r.shape, [32, 3, 3]);
    assert_eq!(t.shape, [32, 3]);
    assert!(is_orthonormal(&r, &Tolerance::default())?);
    assert_eq!(*t.get_unchecked([31, 0]), 31.0);
    assert_eq!(
        tf.rotation().value().as_slice(),
        rotations.value().as_slice()
    );
    Ok(())
}

#[test]
fn affine_entry_must_be_one() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = homogeneous(&rotation_about(2, 1.0), [0.0, 0.0, 0.0]);
    data[15] = 0.0;
    let res = RigidTransform::new(Tensor2::from_shape_vec([4, 4], data)?);
    assert_eq!(res.err(), Some(LieError::AffineError { invalid: vec![0] }));
    Ok(())
}

#[test]
fn loose_tolerance_accepts_f32_rounding() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<f32> = rotation_about(0, 0.3)
        .iter()
        .flatten()
        .map(|&v| v as f32)
        .collect();
    let tol = Tolerance::new(1e-5, 1e-6);
    let rot = RotationMatrix::with_tolerance(Tensor2::from_shape_vec([3, 3], data)?, tol)?;
    assert_eq!(rot.tolerance(), tol);
    Ok(())
}

#[test]
fn shape_errors_report_the_input_shape() {
    let err = RotationMatrix::new(Tensor2::<f64>::from_shape_val([4, 4], 0.0)).err();
    assert_eq!(
        err.map(|e| e.to_string()),
        Some("SO3 matrices cannot be of shape [4, 4]".to_string())
    );

    let err = RigidTransform::new(Tensor3::<f64>::from_shape_val([2, 3, 3], 0.0)).err();
    assert!(matches!(err, Some(LieError::ShapeError { group: "SE3", .. })));
}
