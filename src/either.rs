//! A value holding exactly one of a failure or a success.

use crate::error::InvalidStateError;

/// Either a failure value or a success value, never both.
///
/// Every execution mode of a [`crate::Request`] produces an `Either<TransportError, Response>`, so
/// the same handling code works for blocking, deferred and streamed exchanges alike.
///
/// ```
/// use courier::Either;
///
/// let e: Either<String, u16> = Either::Success(201);
/// assert!(e.is_success());
/// assert_eq!(e.map(|f| f.len(), |s| s as usize), 201);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Either<F, S> {
    /// The failure case.
    Failure(F),
    /// The success case.
    Success(S),
}

impl<F, S> Either<F, S> {
    /// Returns `true` if this is the failure case.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns `true` if this is the success case.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrows the failure value.
    ///
    /// Fails with [`InvalidStateError::NotFailure`] on the success case.
    pub fn peek_failure(&self) -> Result<&F, InvalidStateError> {
        match self {
            Self::Failure(f) => Ok(f),
            Self::Success(_) => Err(InvalidStateError::NotFailure),
        }
    }

    /// Takes the success value.
    ///
    /// Fails with [`InvalidStateError::NotSuccess`] on the failure case.
    pub fn unwrap_success(self) -> Result<S, InvalidStateError> {
        match self {
            Self::Success(s) => Ok(s),
            Self::Failure(_) => Err(InvalidStateError::NotSuccess),
        }
    }

    /// Applies exactly one of the two transforms and returns its result.
    pub fn map<T>(self, on_failure: impl FnOnce(F) -> T, on_success: impl FnOnce(S) -> T) -> T {
        match self {
            Self::Failure(f) => on_failure(f),
            Self::Success(s) => on_success(s),
        }
    }

    /// Transforms the failure value, passing a success through untouched.
    pub fn map_failure<G>(self, f: impl FnOnce(F) -> G) -> Either<G, S> {
        match self {
            Self::Failure(v) => Either::Failure(f(v)),
            Self::Success(s) => Either::Success(s),
        }
    }

    /// Transforms the success value, passing a failure through untouched.
    pub fn map_success<T>(self, f: impl FnOnce(S) -> T) -> Either<F, T> {
        match self {
            Self::Failure(v) => Either::Failure(v),
            Self::Success(s) => Either::Success(f(s)),
        }
    }

    /// Runs `f` on the failure value, if any.
    pub fn apply_failure(&self, f: impl FnOnce(&F)) -> &Self {
        if let Self::Failure(v) = self {
            f(v);
        }
        self
    }

    /// Runs `f` on the success value, if any.
    pub fn apply_success(&self, f: impl FnOnce(&S)) -> &Self {
        if let Self::Success(v) = self {
            f(v);
        }
        self
    }

    /// Runs `on_failure` or `on_success` depending on the case.
    pub fn apply_both(&self, on_failure: impl FnOnce(&F), on_success: impl FnOnce(&S)) -> &Self {
        match self {
            Self::Failure(v) => on_failure(v),
            Self::Success(v) => on_success(v),
        }
        self
    }

    /// Returns the success value, or propagates the failure value as an error.
    ///
    /// ```
    /// # use courier::Either;
    /// fn status(e: Either<std::io::Error, u16>) -> Result<u16, std::io::Error> {
    ///     let code = e.success_or_propagate()?;
    ///     Ok(code)
    /// }
    /// # assert_eq!(status(Either::Success(204)).unwrap(), 204);
    /// ```
    pub fn success_or_propagate(self) -> Result<S, F> {
        match self {
            Self::Success(s) => Ok(s),
            Self::Failure(f) => Err(f),
        }
    }

    /// Converts into a [`Result`], with the failure as the error.
    pub fn into_result(self) -> Result<S, F> {
        self.success_or_propagate()
    }

    /// Converts into an [`Option`] holding the failure value.
    pub fn failure(self) -> Option<F> {
        match self {
            Self::Failure(f) => Some(f),
            Self::Success(_) => None,
        }
    }

    /// Converts into an [`Option`] holding the success value.
    pub fn success(self) -> Option<S> {
        match self {
            Self::Success(s) => Some(s),
            Self::Failure(_) => None,
        }
    }

    /// Borrows both sides.
    pub const fn as_ref(&self) -> Either<&F, &S> {
        match self {
            Self::Failure(f) => Either::Failure(f),
            Self::Success(s) => Either::Success(s),
        }
    }
}

impl<F, S> From<Result<S, F>> for Either<F, S> {
    fn from(res: Result<S, F>) -> Self {
        match res {
            Ok(s) => Self::Success(s),
            Err(f) => Self::Failure(f),
        }
    }
}

impl<F, S> From<Either<F, S>> for Result<S, F> {
    fn from(e: Either<F, S>) -> Self {
        e.into_result()
    }
}
