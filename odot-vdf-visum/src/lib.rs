//! exports the ODOT volume-delay function through the VISUM user-defined
//! VDF interface (version 1). the host loads the library, checks
//! `GetInterfaceVersion`, then calls `Calc` for every link, turn, connector
//! and node of each assignment iteration.
//!
//! every export is stateless and safe to call from several host threads.
#![allow(non_snake_case)]

use std::ffi::{CStr, c_char, c_double, c_int};

use odot_vdf_core::{
    model::{
        CurveParameters, HostLanguage, LinkState, OdotVdf, TrafficVolume, UserValues, VdfInput,
        VolumeDelayFunction, metadata,
    },
    util::utf16::encode_ascii_utf16,
};

const TRUE: c_char = 1;
const FALSE: c_char = 0;

static VDF_NAME_UTF16: [u16; metadata::VDF_NAME.len() + 1] =
    encode_ascii_utf16(metadata::VDF_NAME);

static VDF_ID_ASCII: &CStr = c"ODOTVDF";

fn flag(value: bool) -> c_char {
    if value { TRUE } else { FALSE }
}

/// called once after the host starts, before any other function.
#[unsafe(no_mangle)]
pub extern "C" fn Init() -> c_char {
    let _ = env_logger::try_init();
    log::debug!(
        "loaded {} volume-delay function, interface version {}",
        OdotVdf.name(),
        metadata::INTERFACE_VERSION
    );
    TRUE
}

/// called once before the host shuts down. nothing to release.
#[unsafe(no_mangle)]
pub extern "C" fn Destroy() {}

#[unsafe(no_mangle)]
pub extern "C" fn IsThreadSafe() -> c_char {
    flag(metadata::IS_THREAD_SAFE)
}

#[unsafe(no_mangle)]
pub extern "C" fn DependsOnTSys() -> c_char {
    flag(metadata::DEPENDS_ON_TSYS)
}

/// name shown in the volume-delay function dialog, as NUL-terminated
/// UTF-16. the same name is returned for every language.
#[unsafe(no_mangle)]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn GetName(langid: *const c_char) -> *const u16 {
    if !langid.is_null() {
        // SAFETY: the host passes a NUL-terminated language code
        let code = unsafe { CStr::from_ptr(langid) };
        let language = HostLanguage::from_code(code.to_bytes());
        log::trace!(
            "name '{}' requested for language {language}",
            language.display_name()
        );
    }
    VDF_NAME_UTF16.as_ptr()
}

/// NUL-terminated ASCII id stored in the host's version files
#[unsafe(no_mangle)]
pub extern "C" fn GetID() -> *const c_char {
    VDF_ID_ASCII.as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn GetInterfaceVersion() -> c_int {
    metadata::INTERFACE_VERSION
}

/// announces the transport systems of an assignment. the curve treats all
/// transport systems alike, so there is nothing to record.
#[unsafe(no_mangle)]
pub extern "C" fn SetTsysInfo(_numtsys: c_int, _tsysids: *const *const u16) {}

/// generates an export with the fixed 26-parameter signature of the
/// host's curve functions, forwarding to a `VolumeDelayFunction` method.
/// the per-transport-system volume array is never read.
macro_rules! vdf_export {
    ($(#[$meta:meta])* $export:ident => $method:ident) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        #[allow(clippy::too_many_arguments)]
        pub extern "C" fn $export(
            tsysind: c_int,
            tsysisopen: c_char,
            typ: c_int,
            numlanes: c_int,
            length: c_double,
            cap: c_double,
            v0: c_double,
            t0: c_double,
            gradient: c_double,
            pcuvol: c_double,
            basevol: c_double,
            _vehvolsys: *const c_double,
            uval1: c_int,
            uval2: c_int,
            uval3: c_int,
            uvaltsys: c_int,
            para_a: c_double,
            para_b: c_double,
            para_c: c_double,
            para_d: c_double,
            para_f: c_double,
            para_a2: c_double,
            para_b2: c_double,
            para_d2: c_double,
            para_f2: c_double,
            satcrit: c_double,
        ) -> c_double {
            let input = VdfInput {
                tsys_index: tsysind,
                tsys_is_open: tsysisopen != FALSE,
                link: LinkState {
                    link_type: typ,
                    num_lanes: numlanes,
                    length,
                    capacity: cap,
                    free_flow_speed: v0,
                    free_flow_time: t0,
                    gradient,
                },
                volume: TrafficVolume {
                    pcu_volume: pcuvol,
                    base_volume: basevol,
                },
                user: UserValues {
                    uval1,
                    uval2,
                    uval3,
                    uval_tsys: uvaltsys,
                },
                params: CurveParameters {
                    a: para_a,
                    b: para_b,
                    c: para_c,
                    d: para_d,
                    f: para_f,
                    a2: para_a2,
                    b2: para_b2,
                    d2: para_d2,
                    f2: para_f2,
                    sat_crit: satcrit,
                },
            };
            OdotVdf.$method(&input)
        }
    };
}

vdf_export! {
    /// current travel time t_curr in seconds
    Calc => calc
}

vdf_export! {
    /// always 0, the host computes the derivative numerically
    CalcDerivative => calc_derivative
}

vdf_export! {
    /// always 0, the host computes the integral numerically
    CalcIntegral => calc_integral
}
