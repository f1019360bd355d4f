//! ILRS target naming helpers.
//!
//! Satellite laser ranging targets are named in three related ways:
//!
//! * **ILRS id** – 7 digits, `YYLLLNN` (`8606101`): launch year, launch number, piece number.
//! * **Short COSPAR** – `YYLLLA` (`86061A`): the piece number written in letters.
//! * **COSPAR** – `YYYY-LLLA` (`1986-061A`): the international designator.
//!
//! Piece numbers use a bijective base 26 (`1 → A`, `26 → Z`, `27 → AA`).

/// Convert an ILRS id to a short COSPAR designator.
///
/// Return
/// ----------
/// * `None` unless `ilrs_id` is exactly 7 ASCII digits with a non-zero piece number.
pub fn ilrs_id_to_short_cospar(ilrs_id: &str) -> Option<String> {
    if ilrs_id.len() != 7 || !ilrs_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut piece: u32 = ilrs_id[5..].parse().ok()?;
    if piece == 0 {
        return None;
    }

    let mut letters = Vec::new();
    while piece > 0 {
        let rem = (piece - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        piece = (piece - 1) / 26;
    }

    let mut short_cospar = ilrs_id[..5].to_string();
    short_cospar.extend(letters.iter().rev());
    Some(short_cospar)
}

/// Convert a short COSPAR designator to a full COSPAR designator.
///
/// Two-digit years from 57 on are read as 19xx (first launch in 1957), the others as 20xx.
/// The result is upper-cased.
pub fn short_cospar_to_cospar(short_cospar: &str) -> Option<String> {
    let year = short_cospar.get(..2)?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: u32 = year.parse().ok()?;
    let century = if yy >= 57 { "19" } else { "20" };
    Some(format!("{century}{year}-{}", &short_cospar[2..]).to_uppercase())
}

/// Convert an ILRS id to a full COSPAR designator.
pub fn ilrs_id_to_cospar(ilrs_id: &str) -> Option<String> {
    ilrs_id_to_short_cospar(ilrs_id).and_then(|s| short_cospar_to_cospar(&s))
}

/// Convert a short COSPAR designator back to an ILRS id.
///
/// Return
/// ----------
/// * `None` if there is no letter suffix or the piece number does not fit in two digits.
pub fn short_cospar_to_ilrs_id(short_cospar: &str) -> Option<String> {
    let split = short_cospar.find(|c: char| c.is_ascii_alphabetic())?;
    let (digits, letters) = short_cospar.split_at(split);
    if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let piece = letters.chars().try_fold(0_u32, |acc, c| {
        acc.checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)
    })?;
    (piece < 100).then(|| format!("{digits}{piece:02}"))
}
