//! Dense shape-indexed storage for payoff tables.
//!
//! Indices are one-based and the backing store is row-major with the last
//! axis varying fastest:
//! `offset = Σ (indices[i] - 1) * Π_{j>i} shape[j]`.

use crate::{ActionProfile, error::TensorError};

/// Dense tensor with a fixed shape.
///
/// The cell type defaults to `f64`; integer payoff tables use `Tensor<i64>`.
///
/// # Examples
/// ```
/// use gamegen_core::Tensor;
///
/// let mut tensor = Tensor::new(&[2, 3])?;
/// tensor.set(&[2, 1], 4.5)?;
/// assert_eq!(tensor.get(&[2, 1])?, 4.5);
/// assert_eq!(tensor.offset(&[2, 1])?, 3);
/// # Ok::<(), gamegen_core::TensorError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T = f64> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    values: Vec<T>,
}

impl<T> Tensor<T> {
    /// Allocates a tensor filled with `T::default()`.
    ///
    /// # Errors
    /// Returns [`TensorError::EmptyShape`] for a rank-zero shape,
    /// [`TensorError::ZeroDimension`] when an axis has size zero and
    /// [`TensorError::Overflow`] when the cell count exceeds `usize`.
    pub fn new(shape: &[usize]) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        let (strides, len) = layout(shape)?;
        Ok(Self {
            shape: shape.to_vec(),
            strides,
            values: vec![T::default(); len],
        })
    }

    /// Builds a tensor by evaluating `fill` at every one-based index in
    /// storage order.
    ///
    /// # Errors
    /// Validates `shape` exactly as [`Self::new`] does.
    pub fn from_fn<F>(shape: &[usize], mut fill: F) -> Result<Self, TensorError>
    where
        F: FnMut(&[usize]) -> T,
    {
        let (strides, len) = layout(shape)?;
        let mut values = Vec::with_capacity(len);
        let mut indices = vec![1; shape.len()];
        for _ in 0..len {
            values.push(fill(&indices));
            increment_last_fastest(&mut indices, shape);
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides,
            values,
        })
    }

    /// Returns the number of axes.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the declared size of every axis.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a validated shape has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the backing store in storage order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Translates a one-based index vector into a storage offset.
    ///
    /// # Errors
    /// Returns [`TensorError::RankMismatch`] when `indices` has the wrong
    /// length and [`TensorError::IndexOutOfRange`] when any component lies
    /// outside `[1, shape[axis]]`.
    pub fn offset(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.shape.len() {
            return Err(TensorError::RankMismatch {
                expected: self.shape.len(),
                got: indices.len(),
            });
        }
        let mut offset = 0;
        for (axis, ((&index, &size), &stride)) in indices
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .enumerate()
        {
            if index == 0 || index > size {
                return Err(TensorError::IndexOutOfRange { axis, index, size });
            }
            offset += (index - 1) * stride;
        }
        Ok(offset)
    }

    /// Reads the cell at `indices`.
    ///
    /// # Errors
    /// Propagates [`Self::offset`] failures.
    pub fn get(&self, indices: &[usize]) -> Result<T, TensorError>
    where
        T: Copy,
    {
        let offset = self.offset(indices)?;
        Ok(self.values[offset])
    }

    /// Writes `value` into the cell at `indices`.
    ///
    /// # Errors
    /// Propagates [`Self::offset`] failures; the tensor is unchanged on error.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<(), TensorError> {
        let offset = self.offset(indices)?;
        self.values[offset] = value;
        Ok(())
    }

    /// Returns an action-profile cursor spanning this tensor's shape.
    ///
    /// The cursor visits indices with axis 0 varying fastest, which is the
    /// order payoff tables are written in, not the storage order.
    #[must_use]
    pub fn profiles(&self) -> ActionProfile {
        ActionProfile::from_validated(&self.shape)
    }
}

fn layout(shape: &[usize]) -> Result<(Vec<usize>, usize), TensorError> {
    if shape.is_empty() {
        return Err(TensorError::EmptyShape);
    }
    if let Some(axis) = shape.iter().position(|&size| size == 0) {
        return Err(TensorError::ZeroDimension { axis });
    }
    let mut strides = vec![0; shape.len()];
    let mut len = 1_usize;
    for (stride, &size) in strides.iter_mut().zip(shape).rev() {
        *stride = len;
        len = len.checked_mul(size).ok_or(TensorError::Overflow)?;
    }
    Ok((strides, len))
}

fn increment_last_fastest(indices: &mut [usize], shape: &[usize]) {
    for (index, &size) in indices.iter_mut().zip(shape).rev() {
        if *index < size {
            *index += 1;
            return;
        }
        *index = 1;
    }
}
