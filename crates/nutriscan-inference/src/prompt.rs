//! The fixed instruction prompt sent alongside every analyzed photo.

/// Schema-describing instruction for the vision model. The model is asked
/// for bare JSON; fence stripping in [`crate::reconcile`] covers models
/// that wrap it in markdown anyway.
pub const NUTRITION_PROMPT: &str = r#"
Given a photo, you will return JSON with some of the relevant nutrition facts pictured, if a nutrition facts label is shown in the photo. You will respond in only valid JSON with this format:

{
	"nutrition_label_found": "true",
	"serving_grams": 40,
	"calories": 170,
	"saturated_fat_grams": 2,
	"sodium_mg": 140,
	"fibre_grams": 1.5,
	"total_sugar_grams": 13,
	"protein_grams": 3,
	"percent_whole_fruit_or_veg_guess": 0,
	"guessed_packaged_food_name": "Kashi Snack Bar"
}
"#;
