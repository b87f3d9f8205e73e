//! Writes `kmapp里程數.xlsx`, a sample workbook with one sheet per route.
//!
//! Usage: `cargo run --bin generate_sample [OUTPUT]`

use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Extra road distance per stop, as a fraction of the rail mileage.
const DETOURS: [f64; 7] = [0.08, 0.05, 0.12, 0.07, 0.14, 0.06, 0.10];

/// (route, [(place, km from previous stop)])
const ROUTES: &[(&str, &[(&str, f64)])] = &[
    (
        "西部幹線",
        &[
            ("台北", 0.0),
            ("桃園", 38.5),
            ("新竹", 41.2),
            ("竹南", 17.8),
            ("苗栗", 16.4),
            ("台中", 56.9),
            ("彰化", 18.3),
            ("嘉義", 71.5),
            ("台南", 61.2),
            ("高雄", 44.8),
        ],
    ),
    (
        "東部幹線",
        &[
            ("台北", 0.0),
            ("宜蘭", 61.3),
            ("蘇澳", 28.7),
            ("花蓮", 94.6),
            ("玉里", 87.9),
            ("台東", 80.2),
        ],
    ),
];

fn main() -> Result<(), XlsxError> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "kmapp里程數.xlsx".to_string());

    let header = Format::new().set_bold();
    let km = Format::new().set_num_format("0.0");

    let mut workbook = Workbook::new();
    let mut total_rows = 0;
    for (route, stops) in ROUTES {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*route)?;
        for (col, title) in ["編號", "地名", "里程定位", "運輸距離"].iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        let mut mileage: f64 = 0.0;
        for (i, (place, step)) in stops.iter().enumerate() {
            mileage = ((mileage + step) * 10.0_f64).round() / 10.0;
            // Road distance runs a little longer than the rail marker.
            let detour = 1.0 + DETOURS[(i + route.len()) % DETOURS.len()];
            let distance = (mileage * detour * 10.0).round() / 10.0;

            let row = (i + 1) as u32;
            sheet.write_number(row, 0, (i + 1) as f64)?;
            sheet.write_string(row, 1, *place)?;
            sheet.write_number_with_format(row, 2, mileage, &km)?;
            sheet.write_number_with_format(row, 3, distance, &km)?;
        }
        sheet.autofit();
        total_rows += stops.len();
    }

    workbook.save(&output_path)?;
    println!(
        "Wrote {} routes ({total_rows} stops) to {output_path}",
        ROUTES.len()
    );
    Ok(())
}
