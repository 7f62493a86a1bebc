// All LLM prompt text for the Generation module.
// Reuses the marketer persona from llm_client::prompts.

use crate::generation::platform::Platform;
use crate::llm_client::prompts::marketer_persona;

/// Characters of generated content quoted back into an image-prompt request.
const IMAGE_CONTEXT_CHARS: usize = 200;

/// Long-form structure requested for LinkedIn posts.
const LINKEDIN_STRUCTURE: &str = "Give me one attractive headline, and then the content.

Make it long from 400 words to 600 words and engaging, please don't add so many lines together, use between 20 to 30 lines, then CTAs, it should be easy to read.

Add a call to action at the end of the content.";

/// Builds the text-generation prompt for one platform.
/// LinkedIn gets a long-form structure; every other platform uses the general prompt.
pub fn build_content_prompt(platform: &Platform, user_prompt: &str) -> String {
    let name = platform.display_name();
    let base = format!(
        "{}\n\nNow write me content for {name} in text form for {user_prompt}.",
        marketer_persona(name)
    );

    match platform {
        Platform::LinkedIn => format!("{base}\n\n{LINKEDIN_STRUCTURE}"),
        _ => base,
    }
}

/// Builds the request that turns generated content into an image prompt.
pub fn build_image_prompt(platform: &Platform, content: &str) -> String {
    let excerpt: String = content.chars().take(IMAGE_CONTEXT_CHARS).collect();

    match platform {
        Platform::YouTube => format!(
            "Create a detailed YouTube thumbnail image prompt based on this content: {excerpt}... \
            The image should be 16:9 aspect ratio (1280x720), eye-catching, with bold text overlay potential, \
            and designed to attract clicks. Make it vibrant and engaging for YouTube's platform."
        ),
        Platform::MiniBlog => format!(
            "Create a detailed blog header image prompt based on this content: {excerpt}... \
            The image should be 16:9 or 3:2 aspect ratio, professional, clean, and suitable for a blog post header. \
            Make it relevant to the blog topic and visually appealing."
        ),
        other => {
            let name = other.display_name();
            format!(
                "Create a detailed image prompt for {name} based on this content: {excerpt}... \
                Make it visual, specific, and optimized for {name}'s visual style."
            )
        }
    }
}
