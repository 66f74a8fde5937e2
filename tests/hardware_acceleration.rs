//! Hardware acceleration method tests.
//!
//! Listing is checked against a scripted `-hwaccels` answer; whether a real
//! GPU backend works depends on the host and is not tested here.

mod common;

use vidframe::{HardwareAccelerationMethod, VidframeError, available_hardware_methods};

use common::ScriptedRunner;

#[test]
fn available_methods_keep_known_backends_only() {
    let runner = ScriptedRunner::with_duration(0).with_hwaccels(
        "Hardware acceleration methods:\nvdpau\ncuda\nvaapi\nqsv\ndrm\nopencl\nvulkan\n",
    );

    let methods = available_hardware_methods(&runner).unwrap();

    assert_eq!(
        methods,
        [
            HardwareAccelerationMethod::Cuda,
            HardwareAccelerationMethod::Qsv,
            HardwareAccelerationMethod::OpenCl,
            HardwareAccelerationMethod::Vulkan,
        ]
    );
    assert_eq!(runner.calls(), [["-hide_banner", "-hwaccels"]]);
}

#[test]
fn no_backends_is_an_empty_list() {
    let runner = ScriptedRunner::with_duration(0).with_hwaccels("Hardware acceleration methods:\n\n");
    assert!(available_hardware_methods(&runner).unwrap().is_empty());
}

#[test]
fn every_method_round_trips_through_its_name() {
    for method in HardwareAccelerationMethod::ALL {
        assert_eq!(method.to_string().parse::<HardwareAccelerationMethod>().unwrap(), method);
    }
    assert_eq!(HardwareAccelerationMethod::default(), HardwareAccelerationMethod::Cuda);
}

#[test]
fn unknown_method_names_the_input() {
    match "videotoolbox".parse::<HardwareAccelerationMethod>() {
        Err(VidframeError::UnsupportedHardwareMethod(name)) => assert_eq!(name, "videotoolbox"),
        other => panic!("unexpected {other:?}"),
    }
}
