use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_boundary_numerical_values() {
    // u32::MAX = 4294967295
    let file = common::events_file(&[
        "create, 4294967295, 2025-10-20T09:00:00Z, 1000000.0000, 2025-10-25T14:00:00Z, ",
        "confirm, 4294967295, 2025-10-20T09:05:00Z, , , ",
        "complete, 4294967295, 2025-10-25T15:00:00Z, , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("booking-fees"));
    cmd.arg(file.path());

    cmd.assert().success().stdout(predicate::str::contains(
        "4294967295,COMPLETED,1000000.00,30000.00,970000.00,0.00,0.00",
    ));
}

#[test]
fn test_smallest_amount() {
    let file = common::events_file(&[
        "create, 1, 2025-10-20T09:00:00Z, 0.01, 2025-10-25T14:00:00Z, ",
        "confirm, 1, 2025-10-20T09:05:00Z, , , ",
        "complete, 1, 2025-10-25T15:00:00Z, , , ",
        "create, 2, 2025-10-20T09:00:00Z, 0.01, 2025-10-25T14:00:00Z, ",
        "confirm, 2, 2025-10-20T09:05:00Z, , , ",
        "no_show, 2, 2025-10-25T14:30:00Z, , , client",
    ]);

    let mut cmd = Command::new(cargo_bin!("booking-fees"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        // The fee rounds to zero, the stylist keeps the cent
        .stdout(predicate::str::contains("1,COMPLETED,0.01,0.00,0.01,0.00,0.00"))
        // 0.006 rounds to 0.01 refunded, nothing left for the stylist
        .stdout(predicate::str::contains("2,REFUNDED,0.01,0.00,0.00,0.01,0.00"));
}
