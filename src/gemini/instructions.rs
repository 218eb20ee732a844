use serde_json::{json, Value};

pub const SYSTEM_INSTRUCTION: &str = "You are a creative assistant specializing in generating prompts for text-to-video AI models. Your task is to analyze an image and write a detailed prompt that describes how to animate it into a short, looping video with natural, subtle movements. The goal is to make the static image come alive.

Your output must be a JSON object that strictly follows the provided schema.

For the prompts:
- Describe the overall scene and mood.
- Detail the specific movements of main subjects (e.g., a person breathing gently, eyes blinking slowly, hair swaying slightly).
- Detail movements in the environment (e.g., leaves rustling in a light breeze, water rippling, clouds drifting across the sky, light and shadows shifting subtly).
- The animation should be calm and realistic. Avoid exaggerated or fast movements.
- The final video should feel like a living photograph.";

pub const USER_INSTRUCTION: &str = "Analyze this image and generate the video animation prompts.";

/// Every image is sent under this tag whatever its real format.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

pub const RESPONSE_MIME_TYPE: &str = "application/json";

pub const ENGLISH_FIELD: &str = "english_prompt";
pub const VIETNAMESE_FIELD: &str = "vietnamese_prompt";

pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            ENGLISH_FIELD: {
                "type": "STRING",
                "description": "The detailed animation prompt in English. It should describe subtle, natural movements to bring the image to life."
            },
            VIETNAMESE_FIELD: {
                "type": "STRING",
                "description": "The detailed animation prompt in Vietnamese, translating the English version accurately."
            }
        },
        "required": [ENGLISH_FIELD, VIETNAMESE_FIELD]
    })
}
