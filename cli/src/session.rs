use mealroast_core::{AgeBand, Gender, MealAnalysis, MealType, Profile};

/// Maximum number of pending images per analysis
pub const MAX_IMAGES: usize = 3;

/// All mutable state of one capture flow: pending images, meal type, profile
/// and the currently displayed result. Owned by the top-level command loop;
/// no ambient singletons.
#[derive(Debug, Default)]
pub struct CaptureSession {
    images: Vec<String>,
    meal_type: MealType,
    profile: Profile,
    result: Option<MealAnalysis>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending encoded images, in arrival order
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Remaining image capacity
    pub fn capacity(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.images.len())
    }

    /// Add one encoded image. Returns false when the cap is reached; the
    /// image is silently dropped in that case.
    pub fn add_image(&mut self, encoded: String) -> bool {
        if self.capacity() == 0 {
            return false;
        }
        self.images.push(encoded);
        true
    }

    /// Add a batch of encoded images, silently truncating anything beyond the
    /// remaining capacity. Returns how many were accepted.
    pub fn add_images(&mut self, encoded: Vec<String>) -> usize {
        let accepted = encoded.len().min(self.capacity());
        self.images.extend(encoded.into_iter().take(accepted));
        accepted
    }

    /// Remove the pending image at the given position. Returns false when the
    /// position is out of range.
    pub fn remove_image(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.images.remove(index);
        true
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Select the meal type. Clears the pending images and any displayed
    /// result, restarting the capture flow.
    pub fn set_meal_type(&mut self, meal_type: MealType) {
        self.meal_type = meal_type;
        self.images.clear();
        self.result = None;
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn set_age(&mut self, age: AgeBand) {
        self.profile.age = age;
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.profile.gender = gender;
    }

    /// Whether the analyze action is available: at least one pending image
    /// and no result already on display.
    pub fn can_analyze(&self) -> bool {
        !self.images.is_empty() && self.result.is_none()
    }

    pub fn result(&self) -> Option<&MealAnalysis> {
        self.result.as_ref()
    }

    pub fn set_result(&mut self, analysis: MealAnalysis) {
        self.result = Some(analysis);
    }

    /// Rename one item of the displayed result. Touches only the in-memory
    /// result; the already-persisted journal entry keeps the original name,
    /// and calorie values are never edited.
    pub fn rename_item(&mut self, index: usize, name: &str) -> bool {
        match self.result.as_mut().and_then(|r| r.items.get_mut(index)) {
            Some(item) => {
                item.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Reset everything back to defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealroast_core::AnalysisItem;

    fn encoded(n: usize) -> String {
        format!("data:image/jpeg;base64,img{}", n)
    }

    #[test]
    fn test_image_cap_is_enforced() {
        let mut session = CaptureSession::new();
        assert!(session.add_image(encoded(1)));
        assert!(session.add_image(encoded(2)));
        assert!(session.add_image(encoded(3)));

        // Further selections are rejected/ignored
        assert!(!session.add_image(encoded(4)));
        assert_eq!(session.images().len(), MAX_IMAGES);
    }

    #[test]
    fn test_batch_add_truncates_to_capacity() {
        let mut session = CaptureSession::new();
        session.add_image(encoded(1));

        let accepted = session.add_images(vec![encoded(2), encoded(3), encoded(4), encoded(5)]);
        assert_eq!(accepted, 2);
        assert_eq!(session.images().len(), MAX_IMAGES);
        // The ones within capacity are kept in arrival order
        assert_eq!(session.images()[1], encoded(2));
        assert_eq!(session.images()[2], encoded(3));
    }

    #[test]
    fn test_removal_frees_exactly_one_slot() {
        let mut session = CaptureSession::new();
        session.add_images(vec![encoded(1), encoded(2), encoded(3)]);
        assert_eq!(session.capacity(), 0);

        assert!(session.remove_image(1));
        assert_eq!(session.capacity(), 1);
        assert_eq!(session.images(), &[encoded(1), encoded(3)]);

        assert!(!session.remove_image(5));
        assert_eq!(session.capacity(), 1);
    }

    #[test]
    fn test_meal_type_change_clears_images_and_result() {
        let mut session = CaptureSession::new();
        session.add_image(encoded(1));
        session.set_result(MealAnalysis {
            total_kcal: 500.0,
            ..MealAnalysis::default()
        });

        session.set_meal_type(MealType::Dinner);
        assert_eq!(session.meal_type(), MealType::Dinner);
        assert!(session.images().is_empty());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_analyze_unavailable_without_images_or_with_result() {
        let mut session = CaptureSession::new();
        assert!(!session.can_analyze());

        session.add_image(encoded(1));
        assert!(session.can_analyze());

        session.set_result(MealAnalysis::default());
        assert!(!session.can_analyze());
    }

    #[test]
    fn test_rename_item_keeps_kcal_untouched() {
        let mut session = CaptureSession::new();
        session.set_result(MealAnalysis {
            items: vec![AnalysisItem {
                name: "toast".to_string(),
                kcal: 150.0,
            }],
            total_kcal: 150.0,
            ..MealAnalysis::default()
        });

        assert!(session.rename_item(0, "sourdough toast"));
        let result = session.result().unwrap();
        assert_eq!(result.items[0].name, "sourdough toast");
        assert_eq!(result.items[0].kcal, 150.0);
        assert_eq!(result.total_kcal, 150.0);

        assert!(!session.rename_item(7, "nope"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = CaptureSession::new();
        session.set_meal_type(MealType::Snack);
        session.add_image(encoded(1));
        session.set_age(AgeBand::Forties);
        session.set_result(MealAnalysis::default());

        session.reset();
        assert_eq!(session.meal_type(), MealType::Breakfast);
        assert!(session.images().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.profile().age, AgeBand::Twenties);
    }
}
