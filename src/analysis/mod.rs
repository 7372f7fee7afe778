/// This module contains the heart rate variability (HRV) analysis methods.
///
/// The available submodules are:
///
/// - `time`: Provides the time-domain RMSSD reduction, generic over the floating-point width.
pub mod time;
