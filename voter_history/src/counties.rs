//! County codes of the voter roster files.

/// The name of the county with this code, if the code is known.
///
/// Codes are the two digit numbers used by the state (`"27"` is Hennepin).
pub fn county_name(code: &str) -> Option<&'static str> {
    match code {
        "01" => Some("Aitkin"),
        "02" => Some("Anoka"),
        "03" => Some("Becker"),
        "04" => Some("Beltrami"),
        "05" => Some("Benton"),
        "06" => Some("Big-Stone"),
        "07" => Some("Blue-Earth"),
        "08" => Some("Brown"),
        "09" => Some("Carlton"),
        "10" => Some("Carver"),
        "11" => Some("Cass"),
        "12" => Some("Chippewa"),
        "13" => Some("Chisago"),
        "14" => Some("Clay"),
        "15" => Some("Clearwater"),
        "16" => Some("Cook"),
        "17" => Some("Cottonwood"),
        "18" => Some("Crow Wing"),
        "19" => Some("Dakota"),
        "20" => Some("Dodge"),
        "21" => Some("Douglas"),
        "22" => Some("Faribault"),
        "23" => Some("Fillmore"),
        "24" => Some("Freeborn"),
        "25" => Some("Goodhue"),
        "26" => Some("Grant"),
        "27" => Some("Hennepin"),
        "28" => Some("Houston"),
        "29" => Some("Hubbard"),
        "30" => Some("Isanti"),
        "31" => Some("Itasca"),
        "32" => Some("Jackson"),
        "33" => Some("Kanabec"),
        "34" => Some("Kandiyohi"),
        "35" => Some("Kittson"),
        "36" => Some("Koochiching"),
        "37" => Some("Lac qui Parle"),
        "38" => Some("Lake"),
        "39" => Some("Lake of the Woods"),
        "40" => Some("Le Sueur"),
        "41" => Some("Lincoln"),
        "42" => Some("Lyon"),
        "43" => Some("McLeod"),
        "44" => Some("Mahnomen"),
        "45" => Some("Marshall"),
        "46" => Some("Martin"),
        "47" => Some("Meeker"),
        "48" => Some("Mille Lacs"),
        "49" => Some("Morrison"),
        "50" => Some("Mower"),
        "51" => Some("Murray"),
        "52" => Some("Nicollet"),
        "53" => Some("Nobles"),
        "54" => Some("Norman"),
        "55" => Some("Olmsted"),
        "56" => Some("Otter Tail"),
        "57" => Some("Pennington"),
        "58" => Some("Pine"),
        "59" => Some("Pipestone"),
        "60" => Some("Polk"),
        "61" => Some("Pope"),
        "62" => Some("Ramsey"),
        "63" => Some("Red Lake"),
        "64" => Some("Redwood"),
        "65" => Some("Renville"),
        "66" => Some("Rice"),
        "67" => Some("Rock"),
        "68" => Some("Roseau"),
        "69" => Some("St. Louis"),
        "70" => Some("Scott"),
        "71" => Some("Sherburne"),
        "72" => Some("Sibley"),
        "73" => Some("Stearns"),
        "74" => Some("Steele"),
        "75" => Some("Stevens"),
        "76" => Some("Swift"),
        "77" => Some("Todd"),
        "78" => Some("Traverse"),
        "79" => Some("Wabasha"),
        "80" => Some("Wadena"),
        "81" => Some("Waseca"),
        "82" => Some("Washington"),
        "83" => Some("Watonwan"),
        "84" => Some("Wilkin"),
        "85" => Some("Winona"),
        "86" => Some("Wright"),
        "87" => Some("Yellow Medicine"),
        _ => None,
    }
}
