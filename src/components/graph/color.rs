/// Extract the red/green/blue channels of an `rgb(...)`, `rgba(...)` or `#rrggbb` color.
pub fn parse_rgb(color: &str) -> Option<[u32; 3]> {
	let color = color.trim();
	if let Some(hex) = color.strip_prefix('#') {
		if hex.len() != 6 || !hex.is_ascii() {
			return None;
		}
		let channel = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).ok();
		return Some([channel(0)?, channel(2)?, channel(4)?]);
	}

	let mut channels = color
		.split(|c: char| !c.is_ascii_digit())
		.filter(|s| !s.is_empty())
		.map(|s| s.parse::<u32>().ok());
	Some([channels.next()??, channels.next()??, channels.next()??])
}

/// Label color for text drawn on top of `color`: each channel becomes `(c + 100) mod 256`.
///
/// Out-of-range channels are not clamped first, so `rgb(300,0,0)` maps to `rgb(144,100,100)`.
pub fn invert_color(color: &str) -> Option<String> {
	let [r, g, b] = parse_rgb(color)?;
	let shift = |c: u32| (c + 100) % 256;
	Some(format!("rgb({},{},{})", shift(r), shift(g), shift(b)))
}
