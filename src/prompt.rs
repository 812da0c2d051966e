//! Interactive selection of the metal and wavelength.
//!
//! Every prompt repeats until it receives a valid entry; running out of
//! input is an error. Prompts read from any `BufRead` and write to any
//! `Write`, so the binary passes stdin/stdout and tests pass buffers.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};

use crate::{
    dielectric::DrudeParams,
    materials::CATALOG,
    settings::{validate_config, Settings},
};

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow!("input closed before a valid entry was made"));
    }
    Ok(line.trim().to_string())
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    read_line(input)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shows the preset menu until a valid choice is made. The last entry asks
/// for custom Drude constants.
pub fn select_material<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(String, Option<DrudeParams>)> {
    let custom_choice = CATALOG.len() + 1;
    let choice = loop {
        writeln!(output, "Select a metal from the list below:")?;
        for (i, material) in CATALOG.iter().enumerate() {
            writeln!(output, " {}: {}", i + 1, capitalize(material.name))?;
        }
        writeln!(output, " {}: Custom metal", custom_choice)?;

        match read_line(input)?.parse::<usize>() {
            Ok(c) if (1..=custom_choice).contains(&c) => break c,
            Ok(_) => writeln!(
                output,
                "Invalid choice. Please select a number between 1 and {}.",
                custom_choice
            )?,
            Err(_) => writeln!(
                output,
                "Invalid input. Please enter an integer between 1 and {}.",
                custom_choice
            )?,
        }
    };

    let (name, params, custom) = if choice == custom_choice {
        let (name, params) = read_custom_metal(input, output)?;
        (name, params, Some(params))
    } else {
        let material = &CATALOG[choice - 1];
        (material.name.to_string(), material.params, None)
    };

    writeln!(
        output,
        "\nUsing {} with properties: Plasma Frequency = {:e} rad/s, Damping Rate = {:e} rad/s, Epsilon(infinity) = {}",
        capitalize(&name),
        params.omega_p,
        params.gamma,
        params.epsilon_inf
    )?;

    Ok((name, custom))
}

/// Reads a name and the three Drude constants of a custom metal, asking
/// again for the constants until all three parse and pass validation.
pub fn read_custom_metal<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(String, DrudeParams)> {
    let name = ask(input, output, "Enter the name of the metal: ")?;
    let name = if name.is_empty() {
        "custom".to_string()
    } else {
        name
    };

    let questions = [
        "Enter the plasma frequency in rad/s: ",
        "Enter the damping rate in rad/s: ",
        "Enter the high-frequency dielectric constant (epsilon inf): ",
    ];
    loop {
        let mut values = [0.0; 3];
        let mut parsed = true;
        for (value, question) in values.iter_mut().zip(questions) {
            match ask(input, output, question)?.parse::<f64>() {
                Ok(v) => *value = v,
                Err(_) => {
                    parsed = false;
                    break;
                }
            }
        }
        if !parsed {
            writeln!(
                output,
                "Invalid input. Please enter numerical values for plasma frequency, damping rate, and epsilon_inf."
            )?;
            continue;
        }

        match DrudeParams::new(values[0], values[1], values[2]) {
            Ok(params) => return Ok((name, params)),
            Err(e) => writeln!(output, "{}. Please try again.", e)?,
        }
    }
}

/// Asks for a wavelength in nm until a positive number is entered.
pub fn read_wavelength<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<f64> {
    loop {
        match ask(input, output, "Enter the wavelength of light in nm: ")?.parse::<f64>() {
            Ok(w) if w.is_finite() && w > 0.0 => return Ok(w),
            Ok(_) => writeln!(output, "Wavelength must be a positive value. Please try again.")?,
            Err(_) => writeln!(
                output,
                "Invalid input. Please enter a valid number for the wavelength."
            )?,
        }
    }
}

/// Replaces the metal and wavelength of `base` with interactively chosen
/// values. The angle grid and output settings are kept.
pub fn interactive_settings<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    base: Settings,
) -> Result<Settings> {
    let (name, custom) = select_material(input, output)?;
    let wavelength = read_wavelength(input, output)?;

    let mut settings = base;
    match custom {
        Some(params) => {
            settings.custom = Some(params);
            settings.custom_name = Some(name);
        }
        None => {
            settings.material = name;
            settings.custom = None;
        }
    }
    settings.wavelengths = vec![wavelength];

    validate_config(&settings)?;
    Ok(settings)
}
