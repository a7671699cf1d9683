use rollcall_types::AttendanceStatus;

/// Fixed rotation used by confirm (Enter / Space): present -> leave -> absent -> present.
///
/// Direct letter shortcuts never go through this; they assign an absolute status.
pub fn next_status(current: AttendanceStatus) -> AttendanceStatus {
    match current {
        AttendanceStatus::Present => AttendanceStatus::Leave,
        AttendanceStatus::Leave => AttendanceStatus::Absent,
        AttendanceStatus::Absent => AttendanceStatus::Present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_order() {
        assert_eq!(
            next_status(AttendanceStatus::Present),
            AttendanceStatus::Leave
        );
        assert_eq!(
            next_status(AttendanceStatus::Leave),
            AttendanceStatus::Absent
        );
        assert_eq!(
            next_status(AttendanceStatus::Absent),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn test_three_steps_return_to_start() {
        for status in AttendanceStatus::ALL {
            let back = next_status(next_status(next_status(status)));
            assert_eq!(back, status);
        }
    }
}
