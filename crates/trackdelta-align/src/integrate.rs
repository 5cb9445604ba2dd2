//! Lap distance from speed and timestamps.

use crate::channel::Channel;
use crate::error::IntegrateError;
use crate::sample::TelemetrySample;

/// Overwrite each sample's distance with the distance integrated from speed.
///
/// Distance is the running sum of `speed / 3.6 * dt` with speed in km/h and
/// `dt` in seconds. The first sample's `dt` is its own timestamp, i.e. the
/// time elapsed since the start of the lap.
///
/// Samples are left untouched if an error is returned.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IntegrateError::MissingTimestamp`] | A sample has no timestamp (or a NaN one) |
/// | [`IntegrateError::MissingSpeed`] | A sample has no speed value |
/// | [`IntegrateError::NonMonotonicTimestamp`] | A timestamp is lower than its predecessor |
pub fn integrate_distance(samples: &mut [TelemetrySample]) -> Result<(), IntegrateError> {
    let mut distances = Vec::with_capacity(samples.len());
    let mut previous_time = 0.0;
    let mut total = 0.0;

    for (index, sample) in samples.iter().enumerate() {
        let time = sample
            .timestamp
            .filter(|t| t.is_finite())
            .ok_or(IntegrateError::MissingTimestamp { index })?;
        let speed = sample
            .value(Channel::Speed)
            .ok_or(IntegrateError::MissingSpeed { index })?;
        if index > 0 && time < previous_time {
            return Err(IntegrateError::NonMonotonicTimestamp { index });
        }
        total += speed / 3.6 * (time - previous_time);
        previous_time = time;
        distances.push(total);
    }

    for (sample, distance) in samples.iter_mut().zip(distances) {
        sample.distance = distance;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(t: f64, speed: f64) -> TelemetrySample {
        TelemetrySample::at(0.0).with(Channel::Speed, speed).with_timestamp(t)
    }

    #[test]
    fn constant_speed_integrates_linearly() {
        // 36 km/h is 10 m/s
        let mut samples = vec![timed(0.0, 36.0), timed(1.0, 36.0), timed(2.5, 36.0)];
        integrate_distance(&mut samples).unwrap();
        let d: Vec<f64> = samples.iter().map(|s| s.distance).collect();
        assert_eq!(d, vec![0.0, 10.0, 25.0]);
    }

    #[test]
    fn first_sample_uses_time_since_lap_start() {
        let mut samples = vec![timed(0.5, 72.0), timed(1.0, 72.0)];
        integrate_distance(&mut samples).unwrap();
        assert_eq!(samples[0].distance, 10.0);
        assert_eq!(samples[1].distance, 20.0);
    }

    #[test]
    fn missing_timestamp_leaves_samples_untouched() {
        let mut samples = vec![timed(0.0, 36.0), TelemetrySample::at(7.0).with(Channel::Speed, 36.0)];
        let err = integrate_distance(&mut samples).unwrap_err();
        assert!(matches!(err, IntegrateError::MissingTimestamp { index: 1 }));
        assert_eq!(samples[1].distance, 7.0);
    }

    #[test]
    fn missing_speed_rejected() {
        let mut samples = vec![TelemetrySample::at(0.0).with_timestamp(0.0)];
        assert!(matches!(
            integrate_distance(&mut samples),
            Err(IntegrateError::MissingSpeed { index: 0 })
        ));
    }

    #[test]
    fn decreasing_time_rejected() {
        let mut samples = vec![timed(1.0, 10.0), timed(0.5, 10.0)];
        assert!(matches!(
            integrate_distance(&mut samples),
            Err(IntegrateError::NonMonotonicTimestamp { index: 1 })
        ));
    }
}
